//! PNG snapshots of rendered overlays
//!
//! Draws what the browser would show on top of a blank page: each outline in
//! its color at its offset, and a solid tab where its label sits. Label text
//! is not rasterized; tab width follows the label length.

use std::path::Path;

use highlighter_core::{LabelPlacement, OverlayEntry, PageMetrics, Rect, RenderReport};
use highlighter_types::HexColor;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

const BACKGROUND: Color = Color::WHITE;
const LABEL_CHAR_WIDTH: f32 = 9.0;
const LABEL_PADDING: f32 = 6.0;
const LABEL_HEIGHT: f32 = 18.0;
/// Tallest snapshot produced, in pixels
const MAX_HEIGHT: f64 = 16_384.0;

fn paint(color: HexColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba(255);
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = false;
    paint
}

fn sk_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.left as f32,
        rect.top as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

/// Where the label tab for an entry is drawn
pub fn label_rect(entry: &OverlayEntry, viewport_width: f64) -> Rect {
    let width = entry.label.chars().count() as f64 * f64::from(LABEL_CHAR_WIDTH)
        + f64::from(LABEL_PADDING);
    let height = f64::from(LABEL_HEIGHT);
    match entry.label_placement {
        LabelPlacement::TopLeft { top, left } => Rect::new(left, top, width, height),
        LabelPlacement::OutwardCorner { top, right } => {
            Rect::new(viewport_width - right - width, top, width, height)
        }
    }
}

/// Rasterize the report over a blank page the size of the document.
pub fn render(
    report: &RenderReport,
    metrics: &PageMetrics,
    outline_width: u32,
) -> Result<Pixmap, String> {
    let width = metrics.viewport_width.max(1.0).ceil() as u32;
    let height = metrics.document_height().clamp(1.0, MAX_HEIGHT).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| format!("cannot allocate a {}x{} snapshot", width, height))?;
    pixmap.fill(BACKGROUND);

    let stroke = Stroke {
        width: outline_width as f32,
        ..Stroke::default()
    };

    for entry in &report.entries {
        let paint = paint(entry.color);

        // An outline sits outside the border box, past the offset
        let centerline = entry
            .outline_rect()
            .inflate(f64::from(outline_width) / 2.0);
        if let Some(rect) = sk_rect(centerline) {
            let path = PathBuilder::from_rect(rect);
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        if let Some(tab) = sk_rect(label_rect(entry, metrics.viewport_width)) {
            pixmap.fill_rect(tab, &paint, Transform::identity(), None);
        }
    }

    Ok(pixmap)
}

pub fn save(
    report: &RenderReport,
    metrics: &PageMetrics,
    outline_width: u32,
    path: &Path,
) -> Result<(), String> {
    let pixmap = render(report, metrics, outline_width)?;
    pixmap
        .save_png(path)
        .map_err(|e| format!("failed to write {}: {}", path.display(), e))
}
