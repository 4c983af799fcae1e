//! Overlay rendering
//!
//! Paints one outline box and one label per highlighted element into a
//! single absolutely-positioned layer at the document's top-left.
//!
//! # Layering
//!
//! - The container spans the full width and the full document height.
//! - Boxes sit at the element's document-relative rect. Offset-rule matches
//!   push the outline outward with `outline-offset`.
//! - Labels are siblings of their box inside the container. Flush entries put
//!   the label on the element's top-left corner; inset entries anchor it to the
//!   outward top-right corner, measured from the container's right edge.

mod context;
mod palette;
mod renderer;
pub mod style;

#[cfg(test)]
mod renderer_tests;

use highlighter_types::{HexColor, HighlightMode};
use serde::Serialize;

use crate::geometry::Rect;

pub use context::OverlayContext;
pub use palette::{CyclePalette, Palette, RandomPalette};
pub use renderer::{OverlayRenderer, select_mode};

/// Where a label is anchored inside the overlay container
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "anchor", rename_all = "snake_case")]
pub enum LabelPlacement {
    /// Flush with the element's top-left corner
    TopLeft { top: f64, left: f64 },
    /// Outside the element's top-right corner, pushed out by the inset
    OutwardCorner { top: f64, right: f64 },
}

impl LabelPlacement {
    pub fn for_element(rect: Rect, inset: u32, viewport_width: f64) -> Self {
        if inset == 0 {
            return Self::TopLeft {
                top: rect.top,
                left: rect.left,
            };
        }
        let inset = f64::from(inset);
        Self::OutwardCorner {
            top: rect.top - inset,
            right: viewport_width - rect.right() - inset,
        }
    }
}

/// One painted (box, label) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayEntry {
    pub mode: HighlightMode,
    pub tag: String,
    pub label: String,
    pub color: HexColor,
    /// Outline offset in pixels, 0 unless the element matched an offset rule
    pub inset: u32,
    pub rect: Rect,
    pub label_placement: LabelPlacement,
}

impl OverlayEntry {
    /// The outline's outer bounds, including the inset
    pub fn outline_rect(&self) -> Rect {
        self.rect.inflate(f64::from(self.inset))
    }
}

/// Result of one render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderReport {
    pub entries: Vec<OverlayEntry>,
    /// Elements dropped by the ignore rule
    pub ignored: usize,
    /// Whether this pass created the container rather than reusing one
    pub container_created: bool,
}

impl RenderReport {
    pub fn entries_for(&self, mode: HighlightMode) -> impl Iterator<Item = &OverlayEntry> {
        self.entries.iter().filter(move |e| e.mode == mode)
    }
}
