//! Loading highlighter configuration from TOML files.

use std::fs;
use std::path::Path;

use highlighter_types::HighlighterConfig;
use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Load a config file. Fields it leaves out keep their defaults.
pub fn load_config(path: &Path) -> Result<HighlighterConfig, ConfigError> {
    load_toml(path)
}

/// Read and deserialize any TOML file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "highlighter-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_merges_with_defaults() {
        let path = write_temp("merge", "inset_px = 4\n[readiness]\ntimeout_ms = 1000\n");
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.inset_px, 4);
        assert_eq!(config.readiness.timeout_ms, 1000);
        assert_eq!(config.readiness.poll_interval_ms, 75);
        assert_eq!(config.default_mode, "semantics");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/highlighter.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let path = write_temp("bad", "inset_px = \"wide\"\n");
        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
