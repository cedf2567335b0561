//! Writes a document out for viewing in other tools.
//!
//! Two formats are supported:
//!
//! - **JSON**: the document metadata, every object with its geometry, placement,
//!   colour and recomputed bounds, and the fitted view.
//! - **OpenSCAD**: one coloured, placed `cube`/`cylinder` statement per object,
//!   which renders the assembly in any OpenSCAD viewer.

mod openscad;

pub use openscad::to_openscad;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::document::Document;
use crate::geometry::{Bounds, Color, Dimensions, Placement};

/// Errors that can occur while exporting a document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export file could not be written.
    #[error("failed to write export file: {path}")]
    WriteError {
        /// Destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialised.
    #[error("failed to serialise document '{document}'")]
    SerialiseError {
        /// Document name.
        document: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// OpenSCAD script.
    Scad,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Scad => "scad",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "scad" | "openscad" => Ok(Self::Scad),
            other => Err(format!("unknown export format '{other}', expected json or scad")),
        }
    }
}

/// Serialisable snapshot of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Document name.
    pub name: String,
    /// Document UUID.
    pub uid: String,
    /// Creation time, RFC 3339.
    pub created: String,
    /// Objects in creation order.
    pub objects: Vec<ObjectSnapshot>,
    /// Bounds the view is fitted to.
    pub view: Option<Bounds>,
}

/// Serialisable snapshot of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    /// Object name.
    pub name: String,
    /// Geometry, tagged with the primitive kind.
    pub dimensions: Dimensions,
    /// World placement.
    pub placement: Placement,
    /// Display colour.
    pub color: Color,
    /// Recomputed world bounds.
    pub bounds: Option<Bounds>,
}

impl From<&Document> for DocumentSnapshot {
    fn from(doc: &Document) -> Self {
        Self {
            name: doc.name().to_string(),
            uid: doc.uid().to_string(),
            created: doc.created().to_rfc3339(),
            objects: doc
                .objects()
                .map(|obj| ObjectSnapshot {
                    name: obj.name.clone(),
                    dimensions: obj.dimensions,
                    placement: obj.placement,
                    color: obj.color,
                    bounds: obj.bounds,
                })
                .collect(),
            view: doc.view(),
        }
    }
}

/// Serialises a document to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialisation fails.
pub fn to_json(doc: &Document) -> Result<String, ExportError> {
    serde_json::to_string_pretty(&DocumentSnapshot::from(doc)).map_err(|e| {
        ExportError::SerialiseError {
            document: doc.name().to_string(),
            source: e,
        }
    })
}

/// Renders a document in the given format.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub fn render(doc: &Document, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => to_json(doc),
        ExportFormat::Scad => Ok(to_openscad(doc)),
    }
}

/// Renders a document and writes it to `path`.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn export(doc: &Document, format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    let contents = render(doc, format)?;
    std::fs::write(path, contents).map_err(|e| ExportError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(
        document = doc.name(),
        %format,
        path = %path.display(),
        "Exported document"
    );
    Ok(())
}
