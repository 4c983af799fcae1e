//! Highlight modes and the mode set parsed from the activation marker.
//!
//! The marker value is free text. Each known mode name is looked up by
//! substring, so `"semantics module"` turns on two modes and anything
//! unrecognized is dropped silently.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A single element-selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// Every descendant of the document body
    Semantics,
    /// Elements carrying one of the module class groups
    Module,
    /// Elements carrying one of the grid class groups
    Grid,
}

impl HighlightMode {
    /// All modes, in the order they are rendered.
    pub const ALL: [HighlightMode; 3] = [Self::Semantics, Self::Module, Self::Grid];

    /// Name matched against the marker value
    pub fn name(self) -> &'static str {
        match self {
            Self::Semantics => "semantics",
            Self::Module => "module",
            Self::Grid => "grid",
        }
    }

    fn flag(self) -> ModeSet {
        match self {
            Self::Semantics => ModeSet::SEMANTICS,
            Self::Module => ModeSet::MODULE,
            Self::Grid => ModeSet::GRID,
        }
    }
}

impl std::fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of active highlight modes.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModeSet: u8 {
        const SEMANTICS = 0b001;
        const MODULE    = 0b010;
        const GRID      = 0b100;
    }
}

impl ModeSet {
    /// Parse a marker value by substring match against each mode name.
    ///
    /// # Examples
    /// ```
    /// use highlighter_types::{HighlightMode, ModeSet};
    /// let set = ModeSet::parse("semantics grid");
    /// assert!(set.includes(HighlightMode::Semantics));
    /// assert!(set.includes(HighlightMode::Grid));
    /// assert!(!set.includes(HighlightMode::Module));
    /// ```
    pub fn parse(value: &str) -> Self {
        HighlightMode::ALL
            .into_iter()
            .filter(|mode| value.contains(mode.name()))
            .fold(Self::empty(), |set, mode| set | mode.flag())
    }

    pub fn includes(&self, mode: HighlightMode) -> bool {
        self.contains(mode.flag())
    }

    /// Active modes in render order (semantics, module, grid).
    pub fn modes(&self) -> impl Iterator<Item = HighlightMode> + '_ {
        HighlightMode::ALL
            .into_iter()
            .filter(|mode| self.includes(*mode))
    }
}

impl From<HighlightMode> for ModeSet {
    fn from(mode: HighlightMode) -> Self {
        mode.flag()
    }
}
