use std::path::PathBuf;

use thiserror::Error;

use crate::selector::SelectorError;

/// A host document refused an operation (node creation, attribute write, ...)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host document error: {0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors surfaced while rendering overlays
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("invalid {which} selectors: {source}")]
    Selector {
        which: &'static str,
        #[source]
        source: SelectorError,
    },

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("random color source failed: {0}")]
    Random(getrandom::Error),
}

/// Errors loading TOML configuration or fixtures from disk
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
