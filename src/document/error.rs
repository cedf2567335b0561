//! Error types for document operations.

use thiserror::Error;

use crate::document::Handle;
use crate::geometry::PrimitiveKind;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors a CAD host can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The handle does not refer to an object in this document.
    #[error("Unknown object handle: {handle}")]
    UnknownHandle {
        /// The offending handle.
        handle: Handle,
    },

    /// Geometry of one kind was applied to an object of another kind.
    #[error("Cannot apply {given} geometry to {object} ({expected})")]
    GeometryMismatch {
        /// Object name.
        object: String,
        /// Kind of the object.
        expected: PrimitiveKind,
        /// Kind of the supplied geometry.
        given: PrimitiveKind,
    },

    /// The host refused the operation.
    #[error("Host error: {message}")]
    Host {
        /// Description from the host.
        message: String,
    },
}

impl DocumentError {
    /// Creates an unknown handle error.
    #[must_use]
    pub const fn unknown_handle(handle: Handle) -> Self {
        Self::UnknownHandle { handle }
    }

    /// Creates a host error.
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }
}
