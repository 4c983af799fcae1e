//! `Document` implementation over the live browser DOM

use highlighter_core::{Document, HostError, PageMetrics, Rect, SelectorList};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{css, Element, HtmlElement, NodeList, Window};

/// The page the script runs in
pub struct BrowserDocument {
    window: Window,
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(window: Window, document: web_sys::Document) -> Self {
        Self { window, document }
    }

    fn query_all(&self, root: Option<&Element>, selectors: &str) -> Vec<Element> {
        let list = match root {
            Some(root) => root.query_selector_all(selectors),
            None => self.document.query_selector_all(selectors),
        };
        match list {
            Ok(list) => elements(list),
            Err(err) => {
                warn!(selectors, error = %host_error(err), "querySelectorAll failed");
                Vec::new()
            }
        }
    }

    fn scroll_offset(&self) -> (f64, f64) {
        (
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `.a,.b,.c` for the classes, each escaped as a CSS identifier
fn class_query(classes: &[String], escape: impl Fn(&str) -> String) -> Option<String> {
    if classes.is_empty() {
        return None;
    }
    let selectors = classes
        .iter()
        .map(|class| format!(".{}", escape(class)))
        .collect::<Vec<_>>()
        .join(",");
    Some(selectors)
}

pub(crate) fn host_error(err: JsValue) -> HostError {
    HostError::new(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

impl Document for BrowserDocument {
    type Node = Element;

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn first_with_attribute(&self, name: &str) -> Option<Element> {
        self.document
            .query_selector(&format!("[{}]", name))
            .ok()
            .flatten()
    }

    fn descendants(&self, root: &Element) -> Vec<Element> {
        self.query_all(Some(root), "*")
    }

    fn elements_with_any_class(&self, classes: &[String]) -> Vec<Element> {
        match class_query(classes, css::escape) {
            Some(selectors) => self.query_all(None, &selectors),
            None => Vec::new(),
        }
    }

    fn tag_name(&self, node: &Element) -> String {
        node.local_name().to_ascii_lowercase()
    }

    // `className` is an SVGAnimatedString on SVG elements, so read the attribute
    fn classes(&self, node: &Element) -> Vec<String> {
        node.get_attribute("class")
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn id(&self, node: &Element) -> Option<String> {
        let id = node.id();
        (!id.is_empty()).then_some(id)
    }

    fn parent_element(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn previous_element_sibling(&self, node: &Element) -> Option<Element> {
        node.previous_element_sibling()
    }

    fn next_element_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn has_child_content(&self, node: &Element) -> bool {
        node.has_child_nodes()
    }

    fn matches(&self, node: &Element, selectors: &SelectorList) -> bool {
        if selectors.is_empty() {
            return false;
        }
        node.matches(selectors.source())
            .unwrap_or_else(|_| selectors.matches(self, node))
    }

    fn is_inclusive_descendant(&self, node: &Element, ancestor: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn rect(&self, node: &Element) -> Rect {
        let bounds = node.get_bounding_client_rect();
        let (scroll_x, scroll_y) = self.scroll_offset();
        Rect::new(
            bounds.left() + scroll_x,
            bounds.top() + scroll_y,
            bounds.width(),
            bounds.height(),
        )
    }

    fn metrics(&self) -> PageMetrics {
        let root = self.document.document_element();
        let body = self.document.body();
        let root_html = root.as_ref().and_then(|r| r.dyn_ref::<HtmlElement>());

        PageMetrics {
            viewport_width: root.as_ref().map_or(0, |r| r.client_width()).into(),
            client_height: root.as_ref().map_or(0, |r| r.client_height()).into(),
            body_scroll_height: body.as_ref().map_or(0, |b| b.scroll_height()).into(),
            root_scroll_height: root.as_ref().map_or(0, |r| r.scroll_height()).into(),
            body_offset_height: body.as_ref().map_or(0, |b| b.offset_height()).into(),
            root_offset_height: root_html.map_or(0, |r| r.offset_height()).into(),
        }
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, HostError> {
        self.document.create_element(tag).map_err(host_error)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), HostError> {
        node.set_attribute(name, value).map_err(host_error)
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<(), HostError> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), HostError> {
        parent.append_child(child).map(|_| ()).map_err(host_error)
    }

    fn remove_children(&mut self, node: &Element) -> Result<(), HostError> {
        node.set_inner_html("");
        Ok(())
    }

    fn set_body_overflow_x(&mut self, value: &str) -> Result<(), HostError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| HostError::new("document has no body"))?;
        body.style()
            .set_property("overflow-x", value)
            .map_err(host_error)
    }
}
