//! Readiness signal wiring
//!
//! Registers one token per layout-affecting resource and settles it when the
//! browser reports the resource done. Resources that are already complete
//! when wiring runs (cached images, a loaded window) settle right away rather
//! than waiting for an event that already fired.

use std::cell::RefCell;
use std::rc::Rc;

use highlighter_core::{ReadinessGate, SettleToken, SignalKind};
use tracing::{debug, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AddEventListenerOptions, EventTarget, HtmlImageElement, HtmlMediaElement, Window};

use crate::clock::BrowserClock;

/// `HTMLMediaElement.HAVE_METADATA`
const HAVE_METADATA: u16 = 1;

/// What wiring does with a resource's token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    /// The resource finished before wiring ran
    Settled,
    /// Settle on whichever of these events fires first
    Pending(&'static [&'static str]),
}

fn window_readiness(ready_state: Option<&str>) -> Readiness {
    match ready_state {
        Some("complete") => Readiness::Settled,
        _ => Readiness::Pending(&["load"]),
    }
}

/// `complete` is also true for a broken or source-less image.
fn image_readiness(complete: bool) -> Readiness {
    if complete {
        Readiness::Settled
    } else {
        Readiness::Pending(&["load", "error"])
    }
}

fn media_readiness(ready_state: u16) -> Readiness {
    if ready_state >= HAVE_METADATA {
        Readiness::Settled
    } else {
        Readiness::Pending(&["loadedmetadata", "error"])
    }
}

/// A token shared by several listeners. The first to claim it settles it.
#[derive(Clone)]
struct SharedToken(Rc<RefCell<Option<SettleToken>>>);

impl SharedToken {
    fn new(token: SettleToken) -> Self {
        Self(Rc::new(RefCell::new(Some(token))))
    }

    fn claim(&self) -> Option<SettleToken> {
        self.0.borrow_mut().take()
    }
}

/// Register and wire every signal the page currently has.
pub fn wire(
    window: &Window,
    document: &web_sys::Document,
    gate: &ReadinessGate,
) -> Result<(), JsValue> {
    window_load(window, document, gate.register(SignalKind::WindowLoad))?;
    fonts_ready(document, gate.register(SignalKind::FontsReady));

    let mut images = 0;
    let found = document.query_selector_all("img")?;
    for i in 0..found.length() {
        let Some(image) = found
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlImageElement>().ok())
        else {
            continue;
        };
        image_loaded(&image, gate.register(SignalKind::Image))?;
        images += 1;
    }

    let mut media = 0;
    let found = document.query_selector_all("video, audio")?;
    for i in 0..found.length() {
        let Some(element) = found
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlMediaElement>().ok())
        else {
            continue;
        };
        metadata_loaded(&element, gate.register(SignalKind::Media))?;
        media += 1;
    }

    debug!(images, media, pending = gate.pending(), "Wired readiness signals");
    Ok(())
}

fn settle_after_frame(token: SettleToken) {
    spawn_local(async move {
        let clock = BrowserClock;
        token.settle_after_frame(&clock).await;
    });
}

fn settle_when(
    target: &EventTarget,
    readiness: Readiness,
    token: SettleToken,
) -> Result<(), JsValue> {
    match readiness {
        Readiness::Settled => {
            settle_after_frame(token);
            Ok(())
        }
        Readiness::Pending(events) => settle_on_first(target, events, token),
    }
}

/// Settle the token on whichever of `events` fires first.
fn settle_on_first(
    target: &EventTarget,
    events: &'static [&'static str],
    token: SettleToken,
) -> Result<(), JsValue> {
    let shared = SharedToken::new(token);
    let options = AddEventListenerOptions::new();
    options.set_once(true);

    for &event in events {
        let shared = shared.clone();
        let callback = Closure::once_into_js(move || {
            if let Some(token) = shared.claim() {
                trace!(event, kind = ?token.kind(), "Resource signal fired");
                settle_after_frame(token);
            }
        });
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.unchecked_ref(),
            &options,
        )?;
    }
    Ok(())
}

fn window_load(
    window: &Window,
    document: &web_sys::Document,
    token: SettleToken,
) -> Result<(), JsValue> {
    let ready_state = js_sys::Reflect::get(document, &JsValue::from_str("readyState"))?;
    let readiness = window_readiness(ready_state.as_string().as_deref());
    settle_when(window, readiness, token)
}

fn fonts_ready(document: &web_sys::Document, token: SettleToken) {
    let ready = document.fonts().ready();
    spawn_local(async move {
        if let Ok(promise) = ready {
            // A rejected promise still means the fonts are as done as they get
            let _ = JsFuture::from(promise).await;
        }
        let clock = BrowserClock;
        token.settle_after_frame(&clock).await;
    });
}

fn image_loaded(image: &HtmlImageElement, token: SettleToken) -> Result<(), JsValue> {
    settle_when(image, image_readiness(image.complete()), token)
}

fn metadata_loaded(element: &HtmlMediaElement, token: SettleToken) -> Result<(), JsValue> {
    settle_when(element, media_readiness(element.ready_state()), token)
}
