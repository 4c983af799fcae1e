//! Browser build of the element highlighter
//!
//! Loading the module starts a highlight run on its own. Page scripts can
//! trigger further runs with [`highlight`] or [`highlight_with_config`].

mod clock;
mod dom;
mod signals;

use highlighter_core::{OverlayRenderer, ReadinessGate, RenderReport, Settled, select_mode};
use highlighter_types::{HighlighterConfig, ModeSet};
use tracing::{Level, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub use clock::BrowserClock;
pub use dom::BrowserDocument;

#[wasm_bindgen(start)]
pub fn start() {
    if dioxus_logger::init(Level::INFO).is_err() {
        warn!("Logger already initialized");
    }

    spawn_local(async {
        if let Err(err) = run(HighlighterConfig::default(), None).await {
            error!(error = ?err, "Highlighting failed");
        }
    });
}

/// Highlight the page again. `modes` overrides the page marker when given.
#[wasm_bindgen]
pub async fn highlight(modes: Option<String>) -> Result<JsValue, JsValue> {
    let report = run(HighlighterConfig::default(), modes).await?;
    to_js(&report)
}

/// Highlight the page with a configuration object. Fields it leaves out keep
/// their defaults.
///
/// Loading the module has already rendered once with the default
/// configuration, so this adds a second set of overlays on top of that one.
/// Pass `clear_previous: true` to replace the earlier set instead.
#[wasm_bindgen]
pub async fn highlight_with_config(config: JsValue) -> Result<JsValue, JsValue> {
    let config: HighlighterConfig = if config.is_undefined() || config.is_null() {
        HighlighterConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let report = run(config, None).await?;
    to_js(&report)
}

fn to_js(report: &RenderReport) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(report).map_err(JsValue::from)
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Wait for the page to settle, then render.
async fn run(config: HighlighterConfig, modes: Option<String>) -> Result<RenderReport, JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;

    let gate = ReadinessGate::new(config.readiness);
    signals::wire(&window, &document, &gate)?;

    let mut page = BrowserDocument::new(window, document);
    let clock = BrowserClock;

    gate.wait(&clock, |settled| {
        if settled == Settled::TimedOut {
            warn!("Rendering before every resource has loaded");
        }

        let modes = match &modes {
            Some(modes) => ModeSet::parse(modes),
            None => select_mode(&page, &config),
        };
        let report = OverlayRenderer::new(&config)
            .and_then(|mut renderer| renderer.run(&mut page, modes))
            .map_err(js_error)?;

        info!(
            entries = report.entries.len(),
            ignored = report.ignored,
            "Highlighted page"
        );
        Ok(report)
    })
    .await
}
