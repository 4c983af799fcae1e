//! Page fixtures
//!
//! A fixture describes a page as TOML: the viewport and a tree of elements
//! with their geometry. Images and media may load late (`load_ms`) or never
//! (`stalled = true`), which is what the readiness gate is exercised with.
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [[elements]]
//! tag = "main"
//! rect = [0, 0, 1280, 1600]
//!
//!   [[elements.children]]
//!   tag = "img"
//!   rect = [0, 0, 640, 480]
//!   load_ms = 300
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use highlighter_core::{ElementSpec, MemoryDocument, NodeId, ReadinessGate, SettleToken, SignalKind};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Timing of a page-level signal (window load, fonts)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct SignalFixture {
    pub load_ms: u64,
    pub stalled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    pub viewport: Viewport,
    pub window_load: SignalFixture,
    pub fonts: SignalFixture,
    pub elements: Vec<ElementFixture>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElementFixture {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    /// `[left, top, width, height]` in document pixels
    pub rect: [f64; 4],
    /// Delay before an `img`/`video`/`audio` reports loaded
    pub load_ms: u64,
    /// The resource never reports loaded
    pub stalled: bool,
    pub children: Vec<ElementFixture>,
}

impl ElementFixture {
    fn resource_kind(&self) -> Option<SignalKind> {
        match self.tag.to_ascii_lowercase().as_str() {
            "img" => Some(SignalKind::Image),
            "video" | "audio" => Some(SignalKind::Media),
            _ => None,
        }
    }

    fn spec(&self) -> ElementSpec {
        let [left, top, width, height] = self.rect;
        let mut spec = ElementSpec::new(&self.tag)
            .classes(self.classes.as_slice())
            .rect(left, top, width, height);
        if let Some(id) = &self.id {
            spec = spec.id(id);
        }
        for (name, value) in &self.attributes {
            spec = spec.attr(name, value);
        }
        if let Some(text) = &self.text {
            spec = spec.text(text);
        }
        spec
    }
}

/// A signal that will fire after a delay
#[derive(Debug)]
pub struct PendingSignal {
    pub token: SettleToken,
    pub delay: Duration,
}

/// A fixture materialized into a document plus its readiness signals
#[derive(Debug)]
pub struct Page {
    pub document: MemoryDocument,
    pub signals: Vec<PendingSignal>,
    /// Tokens that are never settled
    pub stalled: Vec<SettleToken>,
}

impl PageFixture {
    /// Build the document and register every signal with the gate.
    pub fn build(&self, gate: &ReadinessGate) -> Page {
        let mut page = Page {
            document: MemoryDocument::new(self.viewport.width, self.viewport.height),
            signals: Vec::new(),
            stalled: Vec::new(),
        };

        page.track(gate.register(SignalKind::WindowLoad), self.window_load);
        page.track(gate.register(SignalKind::FontsReady), self.fonts);

        let body = page.document.body_id();
        for element in &self.elements {
            page.insert(gate, body, element);
        }
        page
    }
}

impl Page {
    fn track(&mut self, token: SettleToken, timing: SignalFixture) {
        if timing.stalled {
            self.stalled.push(token);
        } else {
            self.signals.push(PendingSignal {
                token,
                delay: Duration::from_millis(timing.load_ms),
            });
        }
    }

    fn insert(&mut self, gate: &ReadinessGate, parent: NodeId, element: &ElementFixture) {
        let node = self.document.append(parent, element.spec());
        if let Some(kind) = element.resource_kind() {
            let timing = SignalFixture {
                load_ms: element.load_ms,
                stalled: element.stalled,
            };
            self.track(gate.register(kind), timing);
        }
        for child in &element.children {
            self.insert(gate, node, child);
        }
    }
}
