//! Highlighter configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides. The same structure is accepted from page scripts in the browser.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::rules::{DEFAULT_IGNORE_SELECTORS, DEFAULT_OFFSET_SELECTORS, RuleTable};

/// Top-level configuration for the gate and the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlighterConfig {
    /// Mode string used when the page carries no marker
    pub default_mode: String,
    /// Attribute whose value selects the highlight modes
    pub marker_attribute: String,

    // ─── Produced markup ────────────────────────────────────────────────────
    pub container_id: String,
    pub box_class: String,
    pub label_class: String,

    // ─── Filtering ──────────────────────────────────────────────────────────
    pub ignore_selectors: String,
    pub offset_selectors: String,
    pub modes: RuleTable,

    // ─── Geometry ───────────────────────────────────────────────────────────
    /// Outward inset applied to elements matching the offset selectors
    pub inset_px: u32,
    pub outline_width_px: u32,

    /// Empty an existing overlay container before rendering again.
    /// Off by default: a second run appends a second set of overlays.
    pub clear_previous: bool,

    pub readiness: ReadinessConfig,
}

impl Default for HighlighterConfig {
    fn default() -> Self {
        Self {
            default_mode: "semantics".to_string(),
            marker_attribute: "data-element-highlighter".to_string(),
            container_id: "__element-highlighter-container".to_string(),
            box_class: "__element-highlighter-box".to_string(),
            label_class: "__element-highlighter-label".to_string(),
            ignore_selectors: DEFAULT_IGNORE_SELECTORS.to_string(),
            offset_selectors: DEFAULT_OFFSET_SELECTORS.to_string(),
            modes: RuleTable::default(),
            inset_px: 2,
            outline_width_px: 2,
            clear_previous: false,
            readiness: ReadinessConfig::default(),
        }
    }
}

/// Timing of the readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// How often the pending count is checked
    pub poll_interval_ms: u32,
    /// Upper bound on the wait. `0` waits for every signal, however long.
    pub timeout_ms: u32,
}

impl ReadinessConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms.max(1)))
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(u64::from(self.timeout_ms)))
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 75,
            timeout_ms: 4000,
        }
    }
}
