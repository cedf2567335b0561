//! CAD document model.
//!
//! The generator never talks to a CAD application directly. It drives a
//! [`CadHost`], the small object-creation and placement API every parametric
//! CAD host offers:
//!
//! - create a named box or cylinder
//! - set its size, placement and colour
//! - recompute and fit the view
//!
//! [`Document`] is an in-memory host used by the CLI and the tests. A binding
//! to a real CAD application implements the same trait.
//!
//! Documents are held in a [`Workspace`] and fetched with
//! [`Workspace::lookup_or_create`], which reports whether the document already
//! existed. There is no implicit "active document".

pub mod builder;
pub mod error;
mod memory;

pub use builder::{build_assembly, build_beacon, BuildReport};
pub use error::{DocumentError, DocumentResult};
pub use memory::{Document, DocumentObject, Lookup, Workspace};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Dimensions, Placement, PrimitiveKind};

/// Opaque reference to an object in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(usize);

impl Handle {
    /// Wraps a raw object index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw object index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a host does when asked to create an object whose name is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Return the existing object; rebuilding a document is idempotent.
    #[default]
    Reuse,
    /// Create a new object named `{name}001`, `{name}002`, ...
    Rename,
}

/// Object-creation and placement API of a CAD host.
pub trait CadHost {
    /// Allocates a named solid of the given kind.
    ///
    /// The returned handle's object may carry a different name than requested,
    /// depending on the host's [`NamePolicy`].
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the object.
    fn create_primitive(&mut self, kind: PrimitiveKind, name: &str) -> DocumentResult<Handle>;

    /// Sets the parametric size of an object.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown handle or mismatched primitive kind.
    fn set_geometry(&mut self, handle: Handle, dimensions: Dimensions) -> DocumentResult<()>;

    /// Sets the world placement of an object.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown handle.
    fn set_placement(&mut self, handle: Handle, placement: Placement) -> DocumentResult<()>;

    /// Sets the display colour of an object.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown handle.
    fn set_color(&mut self, handle: Handle, color: Color) -> DocumentResult<()>;

    /// Recomputes every object and fits the view to the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to recompute.
    fn recompute_and_fit_view(&mut self) -> DocumentResult<()>;

    /// Name the host gave the object behind `handle`.
    fn object_name(&self, handle: Handle) -> Option<&str>;
}
