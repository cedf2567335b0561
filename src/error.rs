//! Error types for beacon-assembly.
//!
//! Each concern has its own error enum next to its code
//! ([`LayoutError`], [`DocumentError`], [`ExportError`]); configuration
//! errors live here. [`Error`] wraps them all for the binary.

use std::path::PathBuf;

pub use crate::document::DocumentError;
pub use crate::export::ExportError;
pub use crate::layout::LayoutError;

/// Errors that can occur during configuration operations.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Any error a beacon-assembly run can produce.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Layout error.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Document error.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Export error.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Writing to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid setting"));
    }

    #[test]
    fn wrapped_error_is_transparent() {
        let error = Error::from(LayoutError::DuplicateName {
            name: "PCB".to_string(),
        });
        assert_eq!(error.to_string(), "duplicate row name: PCB");
    }
}
