//! Element highlighter engine
//!
//! Waits for a page to settle, then outlines and labels its structure:
//!
//! 1. [`ReadinessGate`] collects one [`SettleToken`] per layout-affecting
//!    resource and opens once all settle or the timeout elapses.
//! 2. [`select_mode`] reads the active modes from the page marker.
//! 3. [`OverlayRenderer::run`] paints boxes and labels into one overlay layer.
//!
//! The page itself is reached through the [`Document`] trait.

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod overlay;
pub mod readiness;
pub mod selector;

pub use document::Document;
pub use error::{ConfigError, HighlightError, HostError};
pub use geometry::{PageMetrics, Rect};
pub use memory::{ElementSpec, MemoryDocument, NodeId};
pub use overlay::{
    CyclePalette, LabelPlacement, OverlayEntry, OverlayRenderer, Palette, RandomPalette,
    RenderReport, select_mode,
};
pub use readiness::{FrameClock, ReadinessGate, SettleToken, Settled, SignalKind};
pub use selector::{SelectorError, SelectorList};

#[cfg(not(target_arch = "wasm32"))]
pub use readiness::TokioClock;

use highlighter_types::HighlighterConfig;

/// Read the marker and render every mode it selects.
pub fn highlight<D: Document, P: Palette>(
    doc: &mut D,
    config: &HighlighterConfig,
    palette: P,
) -> Result<RenderReport, HighlightError> {
    let modes = select_mode(&*doc, config);
    OverlayRenderer::with_palette(config, palette)?.run(doc, modes)
}
