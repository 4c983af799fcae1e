//! Shared configuration types for the element highlighter.
//!
//! Used by the core engine, the browser backend and the validate CLI.

pub mod color;
pub mod config;
pub mod modes;
pub mod rules;

pub use color::HexColor;
pub use config::{HighlighterConfig, ReadinessConfig};
pub use modes::{HighlightMode, ModeSet};
pub use rules::{LabelSource, RuleGroup, RuleTable};
