//! Tests for the overlay renderer
//!
//! Pages are built in a `MemoryDocument`; colors come from a `CyclePalette`.

use std::collections::BTreeSet;

use highlighter_types::{HighlightMode, HighlighterConfig, ModeSet};

use super::style::style_value;
use super::{CyclePalette, LabelPlacement, OverlayRenderer, RenderReport, select_mode};
use crate::document::Document;
use crate::memory::{ElementSpec, MemoryDocument, NodeId};
use crate::selector::SelectorList;

const VIEWPORT_WIDTH: f64 = 1000.0;

fn page() -> MemoryDocument {
    MemoryDocument::new(VIEWPORT_WIDTH, 800.0)
}

fn render(doc: &mut MemoryDocument, config: &HighlighterConfig, modes: ModeSet) -> RenderReport {
    OverlayRenderer::with_palette(config, CyclePalette::default())
        .unwrap()
        .run(doc, modes)
        .unwrap()
}

fn container(doc: &MemoryDocument, config: &HighlighterConfig) -> NodeId {
    doc.element_by_id(&config.container_id)
        .expect("overlay container should exist")
}

/// Every element in the page gets a distinct top so entries can be traced back
fn tops(report: &RenderReport) -> BTreeSet<i64> {
    report.entries.iter().map(|e| e.rect.top as i64).collect()
}

/// A page exercising every ignore and offset rule
fn structured_page() -> MemoryDocument {
    let mut doc = page();
    let body = doc.body_id();
    let mut top = 0.0;
    let mut next = |tag: &str| {
        top += 10.0;
        ElementSpec::new(tag).rect(0.0, top, 500.0, 10.0)
    };

    let header = doc.append(body, next("header"));
    doc.append(header, next("nav"));
    let main = doc.append(body, next("main"));
    let article = doc.append(main, next("article"));
    doc.append(article, next("h1"));
    doc.append(article, next("p"));
    doc.append(article, next("p"));
    doc.append(article, next("p"));
    let list = doc.append(article, next("ol"));
    doc.append(list, next("li"));
    doc.append(list, next("li"));
    let dl = doc.append(article, next("dl"));
    doc.append(dl, next("dt"));
    doc.append(dl, next("dd"));
    doc.append(dl, next("dt"));
    doc.append(dl, next("dd"));
    let first_quote = doc.append(article, next("blockquote"));
    doc.append(first_quote, next("p"));
    let second_quote = doc.append(article, next("blockquote"));
    doc.append(second_quote, next("cite"));
    doc.append(article, next("figure"));
    let second_figure = doc.append(article, next("figure"));
    doc.append(second_figure, next("img"));
    doc.append(main, next("div"));
    doc.append(main, next("div").class("grid"));
    doc.append(main, next("span"));
    doc.append(main, next("br"));
    doc.append(body, next("script"));
    doc.append(body, next("footer"));
    doc
}

// ─────────────────────────────────────────────────────────────────────────────
// Ignore / offset partition
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ignore_rule_partitions_elements_exactly() {
    let config = HighlighterConfig::default();
    let mut doc = structured_page();
    let ignore = SelectorList::parse(&config.ignore_selectors).unwrap();

    let candidates = doc.descendants(&doc.body_id());
    let expected: BTreeSet<i64> = candidates
        .iter()
        .filter(|n| !doc.matches(n, &ignore))
        .map(|n| doc.rect(n).top as i64)
        .collect();
    let ignored = candidates.len() - expected.len();

    let report = render(&mut doc, &config, ModeSet::SEMANTICS);

    assert_eq!(tops(&report), expected);
    assert_eq!(report.entries.len(), expected.len());
    assert_eq!(report.ignored, ignored);
}

#[test]
fn test_ignore_rule_examples() {
    let config = HighlighterConfig::default();
    let mut doc = structured_page();
    let report = render(&mut doc, &config, ModeSet::SEMANTICS);
    let labels: Vec<&str> = report.entries.iter().map(|e| e.label.as_str()).collect();

    assert_eq!(
        labels,
        vec![
            "HEADER",
            "NAV",
            "MAIN",
            "ARTICLE",
            "H1",
            "P",
            "OL",
            "LI",
            "DL",
            "DT",
            "DD",
            "BLOCKQUOTE",
            "P",
            "FIGURE",
            "DIV",
            "FOOTER",
        ]
    );
}

#[test]
fn test_offset_rule_sets_inset() {
    let config = HighlighterConfig::default();
    let mut doc = structured_page();
    let offset = SelectorList::parse(&config.offset_selectors).unwrap();
    let offset_tops: BTreeSet<i64> = doc
        .descendants(&doc.body_id())
        .iter()
        .filter(|n| doc.matches(n, &offset))
        .map(|n| doc.rect(n).top as i64)
        .collect();

    let report = render(&mut doc, &config, ModeSet::SEMANTICS);

    for entry in &report.entries {
        let expected = if offset_tops.contains(&(entry.rect.top as i64)) {
            2
        } else {
            0
        };
        assert_eq!(entry.inset, expected, "inset for {}", entry.label);
    }

    let container = container(&doc, &config);
    let boxes: Vec<NodeId> = doc
        .children(container)
        .iter()
        .copied()
        .filter(|n| doc.tag_name(n) == "div")
        .collect();
    assert_eq!(boxes.len(), report.entries.len());
    for (node, entry) in boxes.iter().zip(&report.entries) {
        let style = doc.attribute(node, "style").unwrap();
        assert_eq!(
            style_value(&style, "outline-offset"),
            Some(format!("{}px", entry.inset).as_str())
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_second_paragraph_is_ignored() {
    let config = HighlighterConfig::default();
    let mut doc = page();
    let body = doc.body_id();
    doc.append(body, ElementSpec::new("p").rect(0.0, 0.0, 100.0, 20.0));
    doc.append(body, ElementSpec::new("p").rect(0.0, 20.0, 100.0, 20.0));

    let report = render(&mut doc, &config, ModeSet::SEMANTICS);

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].rect.top, 0.0);
    assert_eq!(report.ignored, 1);
}

#[test]
fn test_blockquote_gets_inset_and_corner_label() {
    let config = HighlighterConfig::default();
    let mut doc = page();
    let body = doc.body_id();
    doc.append(
        body,
        ElementSpec::new("blockquote").rect(40.0, 100.0, 600.0, 80.0),
    );

    let report = render(&mut doc, &config, ModeSet::SEMANTICS);
    let entry = &report.entries[0];

    assert_eq!(entry.inset, 2);
    assert_eq!(
        entry.label_placement,
        LabelPlacement::OutwardCorner {
            top: 98.0,
            right: VIEWPORT_WIDTH - 640.0 - 2.0,
        }
    );

    let container = container(&doc, &config);
    let label = doc.children(container)[1];
    let style = doc.attribute(&label, "style").unwrap();
    assert_eq!(style_value(&style, "left"), Some("auto"));
    assert_eq!(style_value(&style, "top"), Some("98px"));
    assert_ne!(style_value(&style, "top"), Some("100px"));
}

#[test]
fn test_plain_element_label_on_top_left() {
    let config = HighlighterConfig::default();
    let mut doc = page();
    let body = doc.body_id();
    doc.append(body, ElementSpec::new("h2").rect(15.0, 30.0, 300.0, 24.0));

    let report = render(&mut doc, &config, ModeSet::SEMANTICS);

    assert_eq!(
        report.entries[0].label_placement,
        LabelPlacement::TopLeft {
            top: 30.0,
            left: 15.0
        }
    );
}

#[test]
fn test_box_and_label_markup() {
    let config = HighlighterConfig::default();
    let mut doc = page();
    let body = doc.body_id();
    doc.append(body, ElementSpec::new("section").rect(8.0, 16.0, 400.0, 200.0));

    let report = render(&mut doc, &config, ModeSet::SEMANTICS);
    let entry = &report.entries[0];

    let container = container(&doc, &config);
    let children = doc.children(container).to_vec();
    assert_eq!(children.len(), 2);

    let (outline, label) = (children[0], children[1]);
    assert_eq!(doc.classes(&outline), vec![config.box_class.clone()]);
    assert_eq!(doc.classes(&label), vec![config.label_class.clone()]);
    assert_eq!(doc.tag_name(&label), "span");
    assert_eq!(doc.text(label), "SECTION");

    let box_css = doc.attribute(&outline, "style").unwrap();
    assert_eq!(style_value(&box_css, "top"), Some("16px"));
    assert_eq!(style_value(&box_css, "left"), Some("8px"));
    assert_eq!(style_value(&box_css, "width"), Some("400px"));
    assert_eq!(style_value(&box_css, "height"), Some("200px"));
    let outline_css = format!("2px solid {}", entry.color);
    assert_eq!(style_value(&box_css, "outline"), Some(outline_css.as_str()));

    let label_css = doc.attribute(&label, "style").unwrap();
    let color = entry.color.to_string();
    assert_eq!(
        style_value(&label_css, "background-color"),
        Some(color.as_str())
    );
}

#[test]
fn test_body_overflow_and_container_geometry() {
    let config = HighlighterConfig::default();
    let mut doc = page();
    let body = doc.body_id();
    doc.append(body, ElementSpec::new("main").rect(0.0, 0.0, 1000.0, 3000.0));

    let report = render(&mut doc, &config, ModeSet::SEMANTICS);

    assert!(report.container_created);
    assert_eq!(doc.body_overflow_x(), Some("hidden"));
    let container = container(&doc, &config);
    assert_eq!(doc.parent_element(&container), Some(body));
    let style = doc.attribute(&container, "style").unwrap();
    assert_eq!(style_value(&style, "height"), Some("3000px"));
    assert_eq!(style_value(&style, "width"), Some("100%"));
    assert_eq!(style_value(&style, "top"), Some("0"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Modes
// ─────────────────────────────────────────────────────────────────────────────

fn grid_page() -> MemoryDocument {
    let mut doc = page();
    let body = doc.body_id();
    doc.append(body, ElementSpec::new("h1").rect(0.0, 0.0, 1000.0, 40.0));
    let grid = doc.append(
        body,
        ElementSpec::new("div")
            .classes(&["grid", "grid-gutters"])
            .rect(0.0, 40.0, 1000.0, 400.0),
    );
    doc.append(
        grid,
        ElementSpec::new("div")
            .classes(&["unit", "unit-1-2"])
            .rect(0.0, 40.0, 500.0, 400.0),
    );
    doc.append(
        grid,
        ElementSpec::new("div")
            .classes(&["unit", "unit-1-2", "highlight"])
            .rect(500.0, 40.0, 500.0, 400.0),
    );
    doc.append(
        body,
        ElementSpec::new("a")
            .classes(&["btn", "btn-ghost"])
            .rect(0.0, 450.0, 120.0, 30.0),
    );
    doc
}

#[test]
fn test_marker_selects_modes() {
    let config = HighlighterConfig::default();
    let mut doc = grid_page();
    let body = doc.body_id();
    doc.append(
        body,
        ElementSpec::new("meta").attr("data-element-highlighter", "semantics grid"),
    );

    assert_eq!(
        select_mode(&doc, &config),
        ModeSet::SEMANTICS | ModeSet::GRID
    );
}

#[test]
fn test_missing_or_empty_marker_falls_back_to_default() {
    let config = HighlighterConfig::default();
    let mut doc = grid_page();
    assert_eq!(select_mode(&doc, &config), ModeSet::SEMANTICS);

    let body = doc.body_id();
    doc.append(body, ElementSpec::new("meta").attr("data-element-highlighter", ""));
    assert_eq!(select_mode(&doc, &config), ModeSet::SEMANTICS);
}

#[test]
fn test_semantics_and_grid_share_one_container() {
    let config = HighlighterConfig::default();
    let mut doc = grid_page();

    let report = render(&mut doc, &config, ModeSet::parse("semantics grid"));

    let semantics = report.entries_for(HighlightMode::Semantics).count();
    let grid: Vec<_> = report.entries_for(HighlightMode::Grid).collect();
    // h1, .grid, both .unit divs, a
    assert_eq!(semantics, 5);
    assert_eq!(grid.len(), 3);
    assert_eq!(grid[0].label, ".grid .grid-gutters");
    assert_eq!(grid[1].label, ".unit .unit-1-2");
    assert_eq!(report.entries_for(HighlightMode::Module).count(), 0);

    let containers: Vec<_> = doc
        .descendants(&doc.body_id())
        .into_iter()
        .filter(|n| doc.id(n).as_deref() == Some(config.container_id.as_str()))
        .collect();
    assert_eq!(containers.len(), 1);
    assert_eq!(
        doc.children(containers[0]).len(),
        report.entries.len() * 2
    );
}

#[test]
fn test_module_mode_labels_with_matched_classes() {
    let config = HighlighterConfig::default();
    let mut doc = grid_page();

    let report = render(&mut doc, &config, ModeSet::MODULE);

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].label, ".btn .btn-ghost");
    assert_eq!(report.entries[0].mode, HighlightMode::Module);
}

#[test]
fn test_unknown_mode_renders_nothing() {
    let config = HighlighterConfig::default();
    let mut doc = grid_page();

    let report = render(&mut doc, &config, ModeSet::parse("flexbox"));

    assert!(report.entries.is_empty());
    assert_eq!(doc.body_overflow_x(), Some("hidden"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Repeated renders
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_rendering_twice_appends_twice_the_entries() {
    let config = HighlighterConfig::default();
    let mut doc = structured_page();

    let first = render(&mut doc, &config, ModeSet::SEMANTICS);
    let container = container(&doc, &config);
    let after_first = doc.children(container).len();

    let second = render(&mut doc, &config, ModeSet::SEMANTICS);

    assert!(first.container_created);
    assert!(!second.container_created);
    assert_eq!(second.entries.len(), first.entries.len());
    assert_eq!(doc.children(container).len(), after_first * 2);
    assert_eq!(tops(&first), tops(&second));
}

#[test]
fn test_clear_previous_keeps_a_single_set() {
    let config = HighlighterConfig {
        clear_previous: true,
        ..Default::default()
    };
    let mut doc = structured_page();

    let first = render(&mut doc, &config, ModeSet::SEMANTICS);
    render(&mut doc, &config, ModeSet::SEMANTICS);

    let container = container(&doc, &config);
    assert_eq!(doc.children(container).len(), first.entries.len() * 2);
}

#[test]
fn test_invalid_selector_config_is_rejected() {
    let config = HighlighterConfig {
        offset_selectors: "ol,, dl".to_string(),
        ..Default::default()
    };
    let err = OverlayRenderer::with_palette(&config, CyclePalette::default())
        .err()
        .expect("parse should fail");
    assert!(err.to_string().starts_with("invalid offset selectors"));
}

#[test]
fn test_escaped_class_in_ignore_list() {
    let mut config = HighlighterConfig::default();
    config.ignore_selectors.push_str(r", .w-1\/2");

    let mut doc = page();
    let body = doc.body_id();
    doc.append(body, ElementSpec::new("section").rect(0.0, 10.0, 500.0, 10.0));
    doc.append(
        body,
        ElementSpec::new("section")
            .class("w-1/2")
            .rect(0.0, 20.0, 500.0, 10.0),
    );

    let report = render(&mut doc, &config, ModeSet::SEMANTICS);
    assert_eq!(tops(&report), BTreeSet::from([10]));
    assert_eq!(report.ignored, 1);
}
