//! Selector matching against an in-memory page

use super::SelectorList;
use crate::memory::{ElementSpec, MemoryDocument, NodeId};

struct Page {
    doc: MemoryDocument,
    quote: NodeId,
    quote_text: NodeId,
    second_quote: NodeId,
    cite: NodeId,
    items: Vec<NodeId>,
    grid: NodeId,
    plain_div: NodeId,
    link: NodeId,
}

fn page() -> Page {
    let mut doc = MemoryDocument::new(800.0, 600.0);
    let body = doc.body_id();

    let quote = doc.append(body, ElementSpec::new("blockquote"));
    let quote_text = doc.append(quote, ElementSpec::new("p"));
    let second_quote = doc.append(body, ElementSpec::new("blockquote"));
    let cite = doc.append(second_quote, ElementSpec::new("cite"));

    let list = doc.append(body, ElementSpec::new("ul").id("menu"));
    let items = (0..4)
        .map(|_| doc.append(list, ElementSpec::new("li")))
        .collect();

    let grid = doc.append(
        body,
        ElementSpec::new("div").classes(&["grid", "grid-full", "w-1/2", "md:flex"]),
    );
    let plain_div = doc.append(grid, ElementSpec::new("div"));
    let link = doc.append(
        grid,
        ElementSpec::new("a").attr("href", "/home").attr("data-kind", "nav"),
    );

    Page {
        doc,
        quote,
        quote_text,
        second_quote,
        cite,
        items,
        grid,
        plain_div,
        link,
    }
}

fn matches(page: &Page, selectors: &str, node: NodeId) -> bool {
    SelectorList::parse(selectors)
        .unwrap()
        .matches(&page.doc, &node)
}

#[test]
fn test_adjacent_sibling_and_its_descendants() {
    let page = page();
    let rule = "blockquote + blockquote, blockquote + blockquote *";
    assert!(!matches(&page, rule, page.quote));
    assert!(!matches(&page, rule, page.quote_text));
    assert!(matches(&page, rule, page.second_quote));
    assert!(matches(&page, rule, page.cite));
}

#[test]
fn test_structural_pseudo_classes() {
    let page = page();
    let items = &page.items;
    assert!(matches(&page, "li:first-child", items[0]));
    assert!(!matches(&page, "li:not(:first-child)", items[0]));
    assert!(matches(&page, "li:not(:first-child)", items[1]));
    assert!(matches(&page, "li:last-child", items[3]));
    assert!(matches(&page, "li:nth-child(2)", items[1]));
    assert!(matches(&page, "li:nth-child(even)", items[3]));
    assert!(!matches(&page, "li:nth-child(odd)", items[3]));
    assert!(matches(&page, "li:nth-child(-n+2)", items[0]));
    assert!(!matches(&page, "li:nth-child(-n+2)", items[2]));
}

#[test]
fn test_combinators() {
    let page = page();
    assert!(matches(&page, "#menu > li", page.items[2]));
    assert!(matches(&page, "body li", page.items[2]));
    assert!(!matches(&page, "blockquote > li", page.items[0]));
    assert!(matches(&page, "li ~ li", page.items[3]));
    assert!(!matches(&page, "li ~ li", page.items[0]));
    assert!(matches(&page, ".grid > a", page.link));
}

#[test]
fn test_negated_classes() {
    let page = page();
    let rule = "div:not(.grid):not(.unit):not(.embed)";
    assert!(!matches(&page, rule, page.grid));
    assert!(matches(&page, rule, page.plain_div));
}

#[test]
fn test_attribute_selectors() {
    let page = page();
    assert!(matches(&page, "[href]", page.link));
    assert!(matches(&page, "a[data-kind=nav]", page.link));
    assert!(matches(&page, "a[data-kind=\"nav\"]", page.link));
    assert!(!matches(&page, "a[data-kind=footer]", page.link));
    assert!(!matches(&page, "[href]", page.grid));
}

#[test]
fn test_type_selectors_ignore_case() {
    let page = page();
    assert!(matches(&page, "BLOCKQUOTE", page.quote));
    assert!(matches(&page, "*", page.cite));
}

#[test]
fn test_escaped_class_names() {
    let page = page();
    let rule = r".w-1\/2, .md\:flex";
    let list = SelectorList::parse(rule).unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.matches(&page.doc, &page.grid));
    assert!(!list.matches(&page.doc, &page.plain_div));
    assert!(matches(&page, r".md\:flex > a", page.link));
}

#[test]
fn test_extreme_nth_offsets_do_not_panic() {
    let page = page();
    for rule in [
        "li:nth-child(n-2147483648)",
        "li:nth-child(-n+2147483647)",
        "li:nth-child(2147483647n-2147483648)",
        "li:nth-last-child(n-2147483648)",
    ] {
        let hits: Vec<bool> = page
            .items
            .iter()
            .map(|&item| matches(&page, rule, item))
            .collect();
        // Every item lies in the same An+B bucket, so the answer is uniform
        assert!(
            hits.iter().all(|&hit| hit == hits[0]),
            "{} split the list: {:?}",
            rule,
            hits
        );
    }
    assert!(matches(&page, "li:nth-child(-n+2147483647)", page.items[3]));
    assert!(!matches(&page, "li:nth-child(2147483647)", page.items[0]));
}

#[test]
fn test_is_and_empty() {
    let page = page();
    assert!(matches(&page, ":is(ul, ol) > li:empty", page.items[1]));
    assert!(!matches(&page, "blockquote:empty", page.quote));
    assert!(matches(&page, "html", page.doc.root()));
    assert!(matches(&page, ":root > body", page.doc.body_id()));
}

#[test]
fn test_links_and_state_pseudo_classes() {
    let page = page();
    assert!(matches(&page, "a:link", page.link));
    assert!(matches(&page, ":any-link", page.link));
    assert!(!matches(&page, "a:hover", page.link));
    assert!(!matches(&page, "div:link", page.grid));
}

#[test]
fn test_pseudo_elements_never_match_elements() {
    let page = page();
    assert!(!matches(&page, "blockquote::before", page.quote));
    assert!(matches(&page, "blockquote::before, blockquote", page.quote));
}

#[test]
fn test_blank_list_matches_nothing() {
    let page = page();
    let list = SelectorList::parse("  \n ").unwrap();
    assert!(list.is_empty());
    assert!(!list.matches(&page.doc, &page.quote));
}

#[test]
fn test_parse_errors() {
    let err = SelectorList::parse("ol,, dl").unwrap_err();
    assert_eq!(err.line, 1);

    assert!(SelectorList::parse("li:frobnicate").is_err());
    assert!(SelectorList::parse("div >").is_err());
    assert!(SelectorList::parse("a[href=").is_err());
}
