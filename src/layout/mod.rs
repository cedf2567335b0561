//! Declarative board layout.
//!
//! A [`LayoutTable`] is an ordered list of [`LayoutRow`]s. Each row names one
//! primitive, gives its size and colour, and anchors it to the board outline
//! or to a row laid out earlier. Resolving the table against a [`BoardSpec`]
//! yields the world-placed primitives in row order.
//!
//! The anchors are the only place placement arithmetic happens; changing the
//! geometry of an assembly means editing its table, see [`beacon`].
//!
//! # Example
//!
//! ```
//! use beacon_assembly::geometry::BoardSpec;
//! use beacon_assembly::layout;
//!
//! let parts = layout::generate(&BoardSpec::default());
//! let esp = parts.iter().find(|p| p.name == "ESP32").unwrap();
//! assert!((esp.placement.position.x - 13.5).abs() < 1e-9);
//! ```

pub mod beacon;

use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

use crate::geometry::{BoardSpec, Color, Dimensions, PlacedPrimitive, Placement, Rotation, Vector3};

/// Errors raised while resolving a custom layout table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A row is anchored to a row that does not precede it.
    #[error("row '{row}' is anchored to '{reference}', which is not laid out before it")]
    UnknownReference {
        /// Row holding the anchor.
        row: String,
        /// Name the anchor refers to.
        reference: String,
    },

    /// Two rows share a name.
    #[error("duplicate row name: {name}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

/// Size of a row's primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowSize {
    /// A box with the board's width, depth and thickness.
    Board,
    /// Fixed dimensions.
    Fixed(Dimensions),
}

impl RowSize {
    fn resolve(&self, board: &BoardSpec) -> Dimensions {
        match *self {
            Self::Board => Dimensions::cuboid(board.width, board.depth, board.thickness),
            Self::Fixed(dims) => dims,
        }
    }
}

/// Horizontal (X) anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XAnchor {
    /// X = 0.
    Origin,
    /// The primitive's X extent is centred on the board, then shifted.
    ///
    /// For a box this puts its corner at `(board.width - length) / 2 + offset`.
    CentredOnBoard {
        /// Shift from the centred position (mm).
        offset: f64,
    },
    /// The primitive's local origin sits on the board centre line, then shifted.
    ///
    /// Use this for cylinders, whose local origin is already their axis.
    BoardCentre {
        /// Shift from the centre line (mm).
        offset: f64,
    },
}

/// Depth (Y) anchor.
#[derive(Debug, Clone, PartialEq)]
pub enum YAnchor {
    /// Y = 0.
    Origin,
    /// Measured from the near (Y = 0) board edge.
    NearEdge {
        /// Distance from the edge (mm).
        offset: f64,
    },
    /// Measured back from the far (Y = depth) board edge.
    FarEdge {
        /// Distance in from the edge (mm).
        inset: f64,
    },
    /// Absolute Y.
    Fixed(f64),
    /// Relative to the resolved Y of an earlier row.
    RelativeTo {
        /// Name of the earlier row.
        name: String,
        /// Shift from that row's Y (mm).
        offset: f64,
    },
}

/// Height (Z) anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZAnchor {
    /// Z = 0.
    Origin,
    /// Measured up from the top surface of the board.
    BoardSurface {
        /// Height above the surface (mm).
        offset: f64,
    },
}

/// One named entry in a layout table.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRow {
    /// Primitive name.
    pub name: String,
    /// Primitive size.
    pub size: RowSize,
    /// X anchor.
    pub x: XAnchor,
    /// Y anchor.
    pub y: YAnchor,
    /// Z anchor.
    pub z: ZAnchor,
    /// Orientation, applied about the primitive's local origin.
    pub rotation: Rotation,
    /// Display colour.
    pub color: Color,
}

impl LayoutRow {
    /// Creates a row at the origin with the identity rotation and default colour.
    #[must_use]
    pub fn new(name: impl Into<String>, size: RowSize) -> Self {
        Self {
            name: name.into(),
            size,
            x: XAnchor::Origin,
            y: YAnchor::Origin,
            z: ZAnchor::Origin,
            rotation: Rotation::identity(),
            color: Color::DEFAULT,
        }
    }

    /// Sets the anchors.
    #[must_use]
    pub fn anchored(mut self, x: XAnchor, y: YAnchor, z: ZAnchor) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Sets the rotation.
    #[must_use]
    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the colour.
    #[must_use]
    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// An ordered, named layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutTable {
    rows: Vec<LayoutRow>,
}

impl LayoutTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Appends a row.
    pub fn push(&mut self, row: LayoutRow) {
        self.rows.push(row);
    }

    /// Appends a row, builder style.
    #[must_use]
    pub fn with(mut self, row: LayoutRow) -> Self {
        self.push(row);
        self
    }

    /// Rows in layout order.
    #[must_use]
    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves every row against `board`.
    ///
    /// Dimensions are not validated: negative sizes and overlapping parts are
    /// laid out as given.
    ///
    /// # Errors
    ///
    /// Returns an error if two rows share a name, or if a row is anchored to a
    /// row that does not precede it.
    pub fn resolve(&self, board: &BoardSpec) -> Result<Vec<PlacedPrimitive>, LayoutError> {
        let mut resolved_y: HashMap<&str, f64> = HashMap::with_capacity(self.rows.len());
        let mut placed = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            if resolved_y.contains_key(row.name.as_str()) {
                return Err(LayoutError::DuplicateName {
                    name: row.name.clone(),
                });
            }

            let dimensions = row.size.resolve(board);

            let x = match row.x {
                XAnchor::Origin => 0.0,
                XAnchor::CentredOnBoard { offset } => {
                    (board.width - dimensions.extent_x()) / 2.0 + offset
                }
                XAnchor::BoardCentre { offset } => board.centre_x() + offset,
            };

            let y = match &row.y {
                YAnchor::Origin => 0.0,
                YAnchor::NearEdge { offset } => *offset,
                YAnchor::FarEdge { inset } => board.depth - inset,
                YAnchor::Fixed(y) => *y,
                YAnchor::RelativeTo { name, offset } => {
                    let base = resolved_y.get(name.as_str()).ok_or_else(|| {
                        LayoutError::UnknownReference {
                            row: row.name.clone(),
                            reference: name.clone(),
                        }
                    })?;
                    base + offset
                }
            };

            let z = match row.z {
                ZAnchor::Origin => 0.0,
                ZAnchor::BoardSurface { offset } => board.thickness + offset,
            };

            trace!(name = %row.name, x, y, z, "Resolved layout row");

            resolved_y.insert(row.name.as_str(), y);
            placed.push(PlacedPrimitive {
                name: row.name.clone(),
                dimensions,
                placement: Placement {
                    position: Vector3::new(x, y, z),
                    rotation: row.rotation,
                },
                color: row.color,
            });
        }

        Ok(placed)
    }
}

/// Lays out the beacon assembly on `board`.
///
/// The built-in table has no forward references or duplicate names, so this
/// cannot fail.
#[must_use]
pub fn generate(board: &BoardSpec) -> Vec<PlacedPrimitive> {
    let table = beacon::table();
    table.resolve(board).unwrap_or_default()
}
