//! Element boxes and page measurements.

use serde::{Deserialize, Serialize};

/// An element's border box in document coordinates (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Grow the rect outward by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            left: self.left - amount,
            top: self.top - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }
}

/// Viewport and content measurements used to size the overlay container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageMetrics {
    pub viewport_width: f64,
    /// `documentElement.clientHeight`
    pub client_height: f64,
    /// `body.scrollHeight`
    pub body_scroll_height: f64,
    /// `documentElement.scrollHeight`
    pub root_scroll_height: f64,
    /// `body.offsetHeight`
    pub body_offset_height: f64,
    /// `documentElement.offsetHeight`
    pub root_offset_height: f64,
}

impl PageMetrics {
    /// Height covering the whole document: the largest of every measurement.
    pub fn document_height(&self) -> f64 {
        [
            self.client_height,
            self.body_scroll_height,
            self.root_scroll_height,
            self.body_offset_height,
            self.root_offset_height,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}
