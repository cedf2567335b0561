//! Configuration file loading and parsing.
//!
//! This module handles loading the configuration file from disk and parsing
//! it into validated, type-safe structures.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path given as the first CLI argument
//! 2. Default location:
//!    - **Linux/macOS:** `~/.beacon-assembly/config.json`
//!    - **Windows:** `%USERPROFILE%\.beacon-assembly\config.json`
//!
//! A missing file at the default location is not an error: the built-in
//! beacon dimensions are used instead.
//!
//! # Example Configuration
//!
//! See `config/example-config.json` for a complete example.

mod settings;

pub use settings::{BoardConfig, Config, DocumentConfig, ExportConfig, LoggingConfig};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.beacon-assembly/`
/// - **Windows:** `%USERPROFILE%\.beacon-assembly\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".beacon-assembly"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, uses the platform-specific default location, falling
/// back to [`Config::default`] when no file exists there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - Required fields are missing or invalid
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound {
                    path: p.to_path_buf(),
                });
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;

    parse_config(&contents).map_err(|e| match e {
        ConfigError::ParseError { source, .. } => ConfigError::ParseError {
            path: config_path.clone(),
            source,
        },
        other => other,
    })
}

/// Parses and validates configuration JSON.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or fails validation.
pub fn parse_config(json: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(json).map_err(|e| ConfigError::ParseError {
        path: PathBuf::from("<inline>"),
        source: e,
    })?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_dir_exists() {
        assert!(default_config_dir().is_some());
    }

    #[test]
    fn default_config_path_exists() {
        let path = default_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("config.json"));
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "board": { "depth": 100.0 } }"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!((config.board.depth - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
