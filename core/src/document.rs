//! Host document abstraction
//!
//! The renderer never touches a concrete DOM. It talks to a `Document`, which
//! the browser backend implements over `web-sys` and `MemoryDocument`
//! implements natively for tests and the validate CLI.
//!
//! Queries return owned node handles in document order. Mutations take
//! `&mut self` so arena-backed hosts need no interior mutability.

use crate::error::HostError;
use crate::geometry::{PageMetrics, Rect};
use crate::selector::SelectorList;

pub trait Document {
    /// Cheap handle to an element
    type Node: Clone + PartialEq + std::fmt::Debug;

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    fn body(&self) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First element, in document order, carrying the attribute
    fn first_with_attribute(&self, name: &str) -> Option<Self::Node>;

    /// Every element below `root`, in document order, excluding `root`
    fn descendants(&self, root: &Self::Node) -> Vec<Self::Node>;

    /// Every element carrying at least one of the classes, in document order.
    /// Equivalent to a single `.a,.b,.c` query.
    fn elements_with_any_class(&self, classes: &[String]) -> Vec<Self::Node>;

    // ─────────────────────────────────────────────────────────────────────────
    // Element structure
    // ─────────────────────────────────────────────────────────────────────────

    /// Lowercase tag name
    fn tag_name(&self, node: &Self::Node) -> String;

    fn classes(&self, node: &Self::Node) -> Vec<String>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn id(&self, node: &Self::Node) -> Option<String> {
        self.attribute(node, "id")
    }

    fn parent_element(&self, node: &Self::Node) -> Option<Self::Node>;

    fn previous_element_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    fn next_element_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether the node has child elements or text (`:empty` is the negation)
    fn has_child_content(&self, node: &Self::Node) -> bool {
        !self.descendants(node).is_empty()
    }

    /// Whether the node matches any selector in the list.
    ///
    /// Hosts with a native matcher may override this and use
    /// [`SelectorList::source`].
    fn matches(&self, node: &Self::Node, selectors: &SelectorList) -> bool {
        selectors.matches(self, node)
    }

    /// Whether `node` is `ancestor` or lies inside it
    fn is_inclusive_descendant(&self, node: &Self::Node, ancestor: &Self::Node) -> bool {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if &n == ancestor {
                return true;
            }
            current = self.parent_element(&n);
        }
        false
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────────────────

    /// Border box relative to the document's top-left corner
    fn rect(&self, node: &Self::Node) -> Rect;

    fn metrics(&self) -> PageMetrics;

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    fn create_element(&mut self, tag: &str) -> Result<Self::Node, HostError>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str)
    -> Result<(), HostError>;

    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), HostError>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), HostError>;

    fn remove_children(&mut self, node: &Self::Node) -> Result<(), HostError>;

    /// Set `overflow-x` on the body element
    fn set_body_overflow_x(&mut self, value: &str) -> Result<(), HostError>;
}
