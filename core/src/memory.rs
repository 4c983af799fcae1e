//! In-memory document
//!
//! An arena-backed element tree with explicit geometry per element. Used by
//! the test suites and by the validate CLI to run the highlighter without a
//! browser.

use crate::document::Document;
use crate::error::HostError;
use crate::geometry::{PageMetrics, Rect};

/// Handle into a [`MemoryDocument`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MemoryElement {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Description of an element to insert with [`MemoryDocument::append`]
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    rect: Rect,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn classes<S: AsRef<str>>(mut self, classes: &[S]) -> Self {
        self.classes
            .extend(classes.iter().map(|c| c.as_ref().to_string()));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn rect(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.rect = Rect::new(left, top, width, height);
        self
    }
}

/// Arena-backed [`Document`] implementation
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<MemoryElement>,
    viewport_width: f64,
    viewport_height: f64,
    body_overflow_x: Option<String>,
}

const ROOT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

impl MemoryDocument {
    /// Empty `<html><body></body></html>` with the given viewport.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let element = |tag: &str, parent| MemoryElement {
            tag: tag.to_string(),
            attributes: Vec::new(),
            text: String::new(),
            rect: Rect::new(0.0, 0.0, viewport_width, 0.0),
            parent,
            children: Vec::new(),
        };

        let mut root = element("html", None);
        root.children.push(BODY);
        Self {
            nodes: vec![root, element("body", Some(ROOT))],
            viewport_width,
            viewport_height,
            body_overflow_x: None,
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    /// Insert a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let mut attributes = spec.attributes;
        if !spec.classes.is_empty() {
            attributes.retain(|(name, _)| name != "class");
            attributes.push(("class".to_string(), spec.classes.join(" ")));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryElement {
            tag: spec.tag,
            attributes,
            text: spec.text,
            rect: spec.rect,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    pub fn body_overflow_x(&self) -> Option<&str> {
        self.body_overflow_x.as_deref()
    }

    /// Number of elements ever created, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn preorder(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[root.0].children {
            out.push(child);
            self.preorder(child, out);
        }
    }

    fn all_attached(&self) -> Vec<NodeId> {
        let mut out = vec![ROOT];
        self.preorder(ROOT, &mut out);
        out
    }

    fn sibling(&self, node: NodeId, step: isize) -> Option<NodeId> {
        let parent = self.nodes[node.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|&n| n == node)?;
        let target = index.checked_add_signed(step)?;
        siblings.get(target).copied()
    }

    fn content_height(&self) -> f64 {
        self.all_attached()
            .into_iter()
            .map(|n| self.nodes[n.0].rect.bottom())
            .fold(0.0, f64::max)
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.all_attached()
            .into_iter()
            .find(|n| self.attribute(n, "id").as_deref() == Some(id))
    }

    fn first_with_attribute(&self, name: &str) -> Option<NodeId> {
        self.all_attached()
            .into_iter()
            .find(|n| self.attribute(n, name).is_some())
    }

    fn descendants(&self, root: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.preorder(*root, &mut out);
        out
    }

    fn elements_with_any_class(&self, classes: &[String]) -> Vec<NodeId> {
        self.all_attached()
            .into_iter()
            .filter(|n| self.classes(n).iter().any(|c| classes.contains(c)))
            .collect()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.nodes[node.0].tag.clone()
    }

    fn classes(&self, node: &NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes[node.0]
            .attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    fn parent_element(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn previous_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.sibling(*node, -1)
    }

    fn next_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.sibling(*node, 1)
    }

    fn has_child_content(&self, node: &NodeId) -> bool {
        let element = &self.nodes[node.0];
        !element.children.is_empty() || !element.text.is_empty()
    }

    fn rect(&self, node: &NodeId) -> Rect {
        self.nodes[node.0].rect
    }

    fn metrics(&self) -> PageMetrics {
        let content = self.content_height();
        PageMetrics {
            viewport_width: self.viewport_width,
            client_height: self.viewport_height,
            body_scroll_height: content,
            root_scroll_height: content.max(self.viewport_height),
            body_offset_height: content,
            root_offset_height: content,
        }
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError> {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryElement {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            text: String::new(),
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
        });
        Ok(id)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), HostError> {
        let element = self
            .nodes
            .get_mut(node.0)
            .ok_or_else(|| HostError::new(format!("unknown node {:?}", node)))?;
        let name = name.to_ascii_lowercase();
        match element.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => element.attributes.push((name, value.to_string())),
        }
        Ok(())
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<(), HostError> {
        let element = self
            .nodes
            .get_mut(node.0)
            .ok_or_else(|| HostError::new(format!("unknown node {:?}", node)))?;
        element.text = text.to_string();
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), HostError> {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return Err(HostError::new("append_child on unknown node"));
        }
        if self.is_inclusive_descendant(parent, child) {
            return Err(HostError::new("append_child would create a cycle"));
        }
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|n| n != child);
        }
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
        Ok(())
    }

    fn remove_children(&mut self, node: &NodeId) -> Result<(), HostError> {
        let element = self
            .nodes
            .get_mut(node.0)
            .ok_or_else(|| HostError::new(format!("unknown node {:?}", node)))?;
        let children = std::mem::take(&mut element.children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        Ok(())
    }

    fn set_body_overflow_x(&mut self, value: &str) -> Result<(), HostError> {
        self.body_overflow_x = Some(value.to_string());
        Ok(())
    }
}
