//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::document::NamePolicy;
use crate::error::ConfigError;
use crate::export::ExportFormat;
use crate::geometry::BoardSpec;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Board outline.
    #[serde(default)]
    pub board: BoardConfig,

    /// Target document settings.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// Board dimensions must be finite. Their sign and size are not checked;
    /// the layout accepts any geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("width", self.board.width),
            ("depth", self.board.depth),
            ("thickness", self.board.thickness),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError {
                    message: format!("board {field} must be a finite number, got {value}"),
                });
            }
        }

        if self.document.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "document name must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Board outline in millimetres.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// Board width (X). Default: 55.
    #[serde(default = "default_board_width")]
    pub width: f64,

    /// Board depth (Y). Default: 80.
    #[serde(default = "default_board_depth")]
    pub depth: f64,

    /// Board thickness (Z). Default: 1.6.
    #[serde(default = "default_board_thickness")]
    pub thickness: f64,
}

impl BoardConfig {
    /// Returns the board spec described by this section.
    #[must_use]
    pub const fn spec(&self) -> BoardSpec {
        BoardSpec::new(self.width, self.depth, self.thickness)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_board_width(),
            depth: default_board_depth(),
            thickness: default_board_thickness(),
        }
    }
}

fn default_board_width() -> f64 {
    BoardSpec::default().width
}

fn default_board_depth() -> f64 {
    BoardSpec::default().depth
}

fn default_board_thickness() -> f64 {
    BoardSpec::default().thickness
}

/// Target document configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Document name. Default: `Beacon_Assembly`.
    #[serde(default = "default_document_name")]
    pub name: String,

    /// What to do when an object name is already taken: "reuse" or "rename".
    #[serde(default)]
    pub name_policy: NamePolicy,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            name: default_document_name(),
            name_policy: NamePolicy::default(),
        }
    }
}

fn default_document_name() -> String {
    "Beacon_Assembly".to_string()
}

/// Export configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Output format: "json" or "scad". Default: "json".
    #[serde(default)]
    pub format: ExportFormat,

    /// Output file. Written to stdout when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.board.spec(), BoardSpec::default());
        assert_eq!(config.document.name, "Beacon_Assembly");
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "board": {
                "width": 60.0,
                "depth": 90.0,
                "thickness": 1.0
            },
            "document": {
                "name": "Beacon_Rev_B",
                "name_policy": "rename"
            },
            "export": {
                "format": "scad",
                "path": "/tmp/beacon.scad"
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!((config.board.width - 60.0).abs() < f64::EPSILON);
        assert!((config.board.depth - 90.0).abs() < f64::EPSILON);
        assert!((config.board.thickness - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.document.name, "Beacon_Rev_B");
        assert_eq!(config.document.name_policy, NamePolicy::Rename);
        assert_eq!(config.export.format, ExportFormat::Scad);
        assert_eq!(config.export.path, Some(PathBuf::from("/tmp/beacon.scad")));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_board_keeps_defaults() {
        let json = r#"{ "board": { "width": 70.0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!((config.board.width - 70.0).abs() < f64::EPSILON);
        assert!((config.board.depth - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_board_accepted() {
        let json = r#"{ "board": { "width": -1.0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reject_empty_document_name() {
        let json = r#"{ "document": { "name": "  " } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_policy() {
        let json = r#"{ "document": { "name_policy": "overwrite" } }"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
