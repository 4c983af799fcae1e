//! [`selectors::Element`] over any [`Document`]
//!
//! Document nodes are owned handles, so two wrappers around the same element
//! do not share an address. The matcher keys its caches on
//! [`OpaqueElement`], so every node reached during one match is interned in a
//! [`NodeScope`] and the boxed slot's address stands in for its identity.

use std::cell::RefCell;
use std::fmt;

use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::bloom::{BloomStorageU8, CountingBloomFilter};
use selectors::matching::{ElementSelectorFlags, MatchingContext};
use selectors::{Element, OpaqueElement};

use super::parser::{CssIdent, HighlightSelectors, PseudoClass, PseudoElement};
use crate::document::Document;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Nodes seen during one selector match
pub(crate) struct NodeScope<N> {
    slots: RefCell<Vec<Box<N>>>,
}

impl<N: PartialEq> NodeScope<N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
        }
    }

    fn intern(&self, node: &N) -> usize
    where
        N: Clone,
    {
        let mut slots = self.slots.borrow_mut();
        if let Some(slot) = slots.iter().position(|n| **n == *node) {
            return slot;
        }
        slots.push(Box::new(node.clone()));
        slots.len() - 1
    }

    fn opaque(&self, slot: usize) -> OpaqueElement {
        let slots = self.slots.borrow();
        OpaqueElement::new::<N>(&*slots[slot])
    }
}

/// An element of `doc`, as the selector matcher sees it
pub(crate) struct DocElement<'a, D: Document + ?Sized> {
    doc: &'a D,
    scope: &'a NodeScope<D::Node>,
    node: D::Node,
    slot: usize,
}

impl<'a, D: Document + ?Sized> DocElement<'a, D> {
    pub(crate) fn new(doc: &'a D, scope: &'a NodeScope<D::Node>, node: D::Node) -> Self {
        let slot = scope.intern(&node);
        Self {
            doc,
            scope,
            node,
            slot,
        }
    }

    fn wrap(&self, node: D::Node) -> Self {
        Self::new(self.doc, self.scope, node)
    }

    fn tag(&self) -> String {
        self.doc.tag_name(&self.node)
    }
}

impl<D: Document + ?Sized> Clone for DocElement<'_, D> {
    fn clone(&self) -> Self {
        Self {
            doc: self.doc,
            scope: self.scope,
            node: self.node.clone(),
            slot: self.slot,
        }
    }
}

impl<D: Document + ?Sized> fmt::Debug for DocElement<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocElement")
            .field("node", &self.node)
            .finish()
    }
}

fn eq_case(a: &str, b: &str, case_sensitivity: CaseSensitivity) -> bool {
    match case_sensitivity {
        CaseSensitivity::CaseSensitive => a == b,
        CaseSensitivity::AsciiCaseInsensitive => a.eq_ignore_ascii_case(b),
    }
}

impl<D: Document + ?Sized> Element for DocElement<'_, D> {
    type Impl = HighlightSelectors;

    fn opaque(&self) -> OpaqueElement {
        self.scope.opaque(self.slot)
    }

    fn parent_element(&self) -> Option<Self> {
        self.doc.parent_element(&self.node).map(|n| self.wrap(n))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.doc
            .previous_element_sibling(&self.node)
            .map(|n| self.wrap(n))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.doc
            .next_element_sibling(&self.node)
            .map(|n| self.wrap(n))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.doc
            .descendants(&self.node)
            .into_iter()
            .find(|n| self.doc.parent_element(n).as_ref() == Some(&self.node))
            .map(|n| self.wrap(n))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, local_name: &str) -> bool {
        self.tag().eq_ignore_ascii_case(local_name)
    }

    fn has_namespace(&self, ns: &str) -> bool {
        ns.is_empty() || ns == HTML_NAMESPACE
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssIdent>,
        local_name: &CssIdent,
        operation: &AttrSelectorOperation<&CssIdent>,
    ) -> bool {
        if let NamespaceConstraint::Specific(url) = ns {
            if !self.has_namespace(url.as_str()) {
                return false;
            }
        }

        let Some(value) = self.doc.attribute(&self.node, local_name.as_str()) else {
            return false;
        };
        match operation {
            AttrSelectorOperation::Exists => true,
            AttrSelectorOperation::WithValue {
                operator,
                case_sensitivity,
                value: expected,
            } => operator.eval_str(&value, expected.as_str(), *case_sensitivity),
        }
    }

    fn match_non_ts_pseudo_class(
        &self,
        pseudo: &PseudoClass,
        _context: &mut MatchingContext<Self::Impl>,
    ) -> bool {
        match pseudo {
            PseudoClass::Link | PseudoClass::AnyLink => self.is_link(),
            // No history, pointer or focus on a page being measured
            PseudoClass::Visited | PseudoClass::Hover | PseudoClass::Active | PseudoClass::Focus => {
                false
            }
        }
    }

    fn match_pseudo_element(
        &self,
        _pseudo: &PseudoElement,
        _context: &mut MatchingContext<Self::Impl>,
    ) -> bool {
        false
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        matches!(self.tag().as_str(), "a" | "area" | "link")
            && self.doc.attribute(&self.node, "href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssIdent, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .id(&self.node)
            .is_some_and(|actual| eq_case(&actual, id.as_str(), case_sensitivity))
    }

    fn has_class(&self, class: &CssIdent, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .classes(&self.node)
            .iter()
            .any(|c| eq_case(c, class.as_str(), case_sensitivity))
    }

    fn has_custom_state(&self, _name: &CssIdent) -> bool {
        false
    }

    fn imported_part(&self, _name: &CssIdent) -> Option<CssIdent> {
        None
    }

    fn is_part(&self, _name: &CssIdent) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        !self.doc.has_child_content(&self.node)
    }

    fn is_root(&self) -> bool {
        self.doc.parent_element(&self.node).is_none() && self.tag() == "html"
    }

    fn add_element_unique_hashes(
        &self,
        _filter: &mut CountingBloomFilter<BloomStorageU8>,
    ) -> bool {
        false
    }
}
