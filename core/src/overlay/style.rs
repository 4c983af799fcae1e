//! Inline style strings for the produced overlay markup.

use std::fmt::Display;

use highlighter_types::HexColor;

use crate::geometry::Rect;

use super::LabelPlacement;

const LABEL_FONT: &str = "bold 1.1rem/1 Menlo, Consolas, monospace";
const LABEL_Z_INDEX: u32 = 1000;

/// Ordered list of CSS declarations rendered as `prop:value;prop:value`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle(Vec<(&'static str, String)>);

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: &'static str, value: impl Display) -> Self {
        self.0.push((property, value.to_string()));
        self
    }

    pub fn px(self, property: &'static str, value: f64) -> Self {
        self.set(property, format_px(value))
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (property, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", property, value)?;
        }
        Ok(())
    }
}

/// `12px`, `12.5px`, `-2px`
pub fn format_px(value: f64) -> String {
    format!("{}px", value)
}

/// Look up a declaration in a `prop:value;...` string.
pub fn style_value<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(p, _)| p.trim() == property)
        .map(|(_, v)| v.trim())
        .last()
}

pub fn container_style(height: f64) -> InlineStyle {
    InlineStyle::new()
        .set("position", "absolute")
        .set("left", 0)
        .set("top", 0)
        .set("width", "100%")
        .px("height", height)
        .set("pointer-events", "none")
}

pub fn box_style(rect: Rect, color: HexColor, outline_width: u32, inset: u32) -> InlineStyle {
    InlineStyle::new()
        .set("position", "absolute")
        .set("outline", format!("{}px solid {}", outline_width, color))
        .px("outline-offset", f64::from(inset))
        .px("top", rect.top)
        .px("left", rect.left)
        .px("width", rect.width)
        .px("height", rect.height)
}

pub fn label_style(color: HexColor, placement: LabelPlacement) -> InlineStyle {
    let style = InlineStyle::new()
        .set("padding", ".1em .3em")
        .set("position", "absolute")
        .set("z-index", LABEL_Z_INDEX)
        .set("background-color", color)
        .set("color", "#fff")
        .set("font", LABEL_FONT)
        .set("text-shadow", "0 0 1px #000");

    match placement {
        LabelPlacement::TopLeft { top, left } => style.px("top", top).px("left", left),
        LabelPlacement::OutwardCorner { top, right } => {
            style.px("top", top).set("left", "auto").px("right", right)
        }
    }
}
