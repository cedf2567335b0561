//! Geometry value types shared by the layout generator and the document model.
//!
//! All lengths are in millimetres, all angles in degrees.
//!
//! # Local Frames
//!
//! The primitives follow the usual parametric-CAD conventions:
//!
//! - **Box**: one corner at the local origin, extending along +X (length),
//!   +Y (width) and +Z (height).
//! - **Cylinder**: base circle centred on the local origin, axis along +Z.
//!
//! A [`Placement`] rotates the local frame about its origin, then translates it.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether a rotation is the identity.
const ANGLE_EPSILON: f64 = 1e-12;

/// A 3D vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component (mm).
    pub x: f64,
    /// Y component (mm).
    pub y: f64,
    /// Z component (mm).
    pub z: f64,
}

impl Vector3 {
    /// Unit vector along +X.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along +Y.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along +Z.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.z.mul_add(other.z, self.x.mul_add(other.x, self.y * other.y))
    }

    /// Cross product.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y.mul_add(other.z, -(self.z * other.y)),
            self.z.mul_add(other.x, -(self.x * other.z)),
            self.x.mul_add(other.y, -(self.y * other.x)),
        )
    }

    /// Multiplies every component by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Returns the vector scaled to unit length, or `None` for the zero vector.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            None
        } else {
            Some(self.scale(1.0 / len))
        }
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An axis-angle rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Rotation axis. Does not need to be normalised.
    pub axis: Vector3,
    /// Rotation angle in degrees, counter-clockwise about `axis`.
    pub angle: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// The identity rotation: zero degrees about +Z.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            axis: Vector3::Z,
            angle: 0.0,
        }
    }

    /// Creates a rotation of `angle` degrees about `axis`.
    #[must_use]
    pub const fn new(axis: Vector3, angle: f64) -> Self {
        Self { axis, angle }
    }

    /// Returns `true` if this rotation leaves every vector unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        (self.angle % 360.0).abs() < ANGLE_EPSILON || self.axis.normalized().is_none()
    }

    /// Rotates `v` using Rodrigues' formula.
    ///
    /// A zero-length axis is treated as the identity.
    #[must_use]
    pub fn apply(&self, v: &Vector3) -> Vector3 {
        let Some(k) = self.axis.normalized() else {
            return *v;
        };
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let term1 = v.scale(cos);
        let term2 = k.cross(v).scale(sin);
        let term3 = k.scale(k.dot(v) * (1.0 - cos));
        term1 + term2 + term3
    }
}

/// A rigid transform: rotation about the local origin followed by translation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// World position of the local origin.
    pub position: Vector3,
    /// Orientation of the local frame.
    #[serde(default)]
    pub rotation: Rotation,
}

impl Placement {
    /// Creates a placement with the identity rotation.
    #[must_use]
    pub const fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            rotation: Rotation::identity(),
        }
    }

    /// Returns a copy with the given rotation.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        Self {
            position: self.position,
            rotation,
        }
    }

    /// Maps a point from the local frame to world coordinates.
    #[must_use]
    pub fn transform_point(&self, local: &Vector3) -> Vector3 {
        self.rotation.apply(local) + self.position
    }
}

/// Display colour as an RGB triple with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Neutral light grey, the default shape colour of most CAD hosts.
    pub const DEFAULT: Self = Self::rgb(0.8, 0.8, 0.8);

    /// Creates a colour from channel values.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Kind of primitive solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Rectangular cuboid.
    Box,
    /// Right circular cylinder.
    Cylinder,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box => write!(f, "box"),
            Self::Cylinder => write!(f, "cylinder"),
        }
    }
}

/// Parametric size of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dimensions {
    /// Box extents along local X, Y and Z.
    Box {
        /// Extent along X (mm).
        length: f64,
        /// Extent along Y (mm).
        width: f64,
        /// Extent along Z (mm).
        height: f64,
    },
    /// Cylinder radius and height along local Z.
    Cylinder {
        /// Radius (mm).
        radius: f64,
        /// Height (mm).
        height: f64,
    },
}

impl Dimensions {
    /// Creates box dimensions.
    #[must_use]
    pub const fn cuboid(length: f64, width: f64, height: f64) -> Self {
        Self::Box {
            length,
            width,
            height,
        }
    }

    /// Creates cylinder dimensions.
    #[must_use]
    pub const fn cylinder(radius: f64, height: f64) -> Self {
        Self::Cylinder { radius, height }
    }

    /// Returns the primitive kind these dimensions describe.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Box { .. } => PrimitiveKind::Box,
            Self::Cylinder { .. } => PrimitiveKind::Cylinder,
        }
    }

    /// Extent of the solid along local X.
    #[must_use]
    pub fn extent_x(&self) -> f64 {
        match *self {
            Self::Box { length, .. } => length,
            Self::Cylinder { radius, .. } => 2.0 * radius,
        }
    }

    /// Axis-aligned bounds of the solid in its local frame.
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        match *self {
            Self::Box {
                length,
                width,
                height,
            } => Bounds::new(Vector3::default(), Vector3::new(length, width, height)),
            Self::Cylinder { radius, height } => Bounds::new(
                Vector3::new(-radius, -radius, 0.0),
                Vector3::new(radius, radius, height),
            ),
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vector3,
    /// Maximum corner.
    pub max: Vector3,
}

impl Bounds {
    /// Creates bounds from two corners.
    #[must_use]
    pub const fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// The eight corners of the box.
    #[must_use]
    pub fn corners(&self) -> [Vector3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Smallest bounds containing every point, or `None` if there are none.
    #[must_use]
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p, p),
                Some(b) => Self::new(
                    Vector3::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z)),
                    Vector3::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z)),
                ),
            })
        })
    }

    /// Smallest bounds containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Centre point.
    #[must_use]
    pub fn centre(&self) -> Vector3 {
        (self.min + self.max).scale(0.5)
    }

    /// Edge lengths along X, Y and Z.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        Vector3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

/// Board outline dimensions (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardSpec {
    /// Extent along X.
    pub width: f64,
    /// Extent along Y.
    pub depth: f64,
    /// Extent along Z; component bodies rest at this height.
    pub thickness: f64,
}

impl BoardSpec {
    /// Creates a board spec.
    #[must_use]
    pub const fn new(width: f64, depth: f64, thickness: f64) -> Self {
        Self {
            width,
            depth,
            thickness,
        }
    }

    /// X coordinate of the board's vertical centre line.
    #[must_use]
    pub fn centre_x(&self) -> f64 {
        self.width / 2.0
    }
}

impl Default for BoardSpec {
    /// The beacon board: 55 × 80 mm, 1.6 mm FR-4.
    fn default() -> Self {
        Self::new(55.0, 80.0, 1.6)
    }
}

/// A named, sized, placed and coloured primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPrimitive {
    /// Object name; unique within one layout.
    pub name: String,
    /// Parametric size, which also fixes the kind.
    pub dimensions: Dimensions,
    /// World placement.
    pub placement: Placement,
    /// Display colour.
    pub color: Color,
}

impl PlacedPrimitive {
    /// Primitive kind.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        self.dimensions.kind()
    }

    /// World-space axis-aligned bounds.
    #[must_use]
    pub fn world_bounds(&self) -> Bounds {
        world_bounds(&self.dimensions, &self.placement)
    }
}

/// World-space axis-aligned bounds of a primitive with the given placement.
#[must_use]
pub fn world_bounds(dimensions: &Dimensions, placement: &Placement) -> Bounds {
    let local = dimensions.local_bounds();
    let corners = local.corners().map(|c| placement.transform_point(&c));
    // Eight corners are always present.
    Bounds::enclosing(corners).unwrap_or(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn vec_approx_eq(a: Vector3, b: Vector3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn rotation_about_x_maps_z_to_negative_y() {
        let rot = Rotation::new(Vector3::X, 90.0);
        let v = rot.apply(&Vector3::Z);
        assert!(vec_approx_eq(v, Vector3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn identity_rotation() {
        assert!(Rotation::identity().is_identity());
        assert!(Rotation::new(Vector3::Y, 360.0).is_identity());
        assert!(!Rotation::new(Vector3::X, 90.0).is_identity());
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Rotation::identity().apply(&v), v);
    }

    #[test]
    fn zero_axis_is_identity() {
        let rot = Rotation::new(Vector3::default(), 45.0);
        assert!(rot.is_identity());
        assert_eq!(rot.apply(&Vector3::X), Vector3::X);
    }

    #[test]
    fn unnormalised_axis_accepted() {
        let rot = Rotation::new(Vector3::new(0.0, 0.0, 5.0), 90.0);
        assert!(vec_approx_eq(rot.apply(&Vector3::X), Vector3::Y));
    }

    #[test]
    fn box_world_bounds_unrotated() {
        let dims = Dimensions::cuboid(28.0, 52.0, 13.0);
        let bounds = world_bounds(&dims, &Placement::at(13.5, 26.0, 1.6));
        assert!(vec_approx_eq(bounds.min, Vector3::new(13.5, 26.0, 1.6)));
        assert!(vec_approx_eq(bounds.max, Vector3::new(41.5, 78.0, 14.6)));
    }

    #[test]
    fn cylinder_local_bounds_centred() {
        let b = Dimensions::cylinder(4.0, 3.0).local_bounds();
        assert!(vec_approx_eq(b.min, Vector3::new(-4.0, -4.0, 0.0)));
        assert!(vec_approx_eq(b.max, Vector3::new(4.0, 4.0, 3.0)));
    }

    #[test]
    fn bounds_union_and_centre() {
        let a = Bounds::new(Vector3::default(), Vector3::new(1.0, 1.0, 1.0));
        let b = Bounds::new(Vector3::new(-1.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 1.0));
        let u = a.union(&b);
        assert!(vec_approx_eq(u.min, Vector3::new(-1.0, 0.0, 0.0)));
        assert!(vec_approx_eq(u.max, Vector3::new(1.0, 3.0, 1.0)));
        assert!(vec_approx_eq(u.centre(), Vector3::new(0.0, 1.5, 0.5)));
        assert!(vec_approx_eq(u.size(), Vector3::new(2.0, 3.0, 1.0)));
    }

    #[test]
    fn enclosing_empty_is_none() {
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn dimensions_kind_and_extent() {
        assert_eq!(Dimensions::cuboid(2.0, 1.2, 1.0).kind(), PrimitiveKind::Box);
        assert_eq!(Dimensions::cylinder(2.0, 10.0).kind(), PrimitiveKind::Cylinder);
        assert!(approx_eq(Dimensions::cylinder(2.0, 10.0).extent_x(), 4.0));
    }

    #[test]
    fn default_board() {
        let board = BoardSpec::default();
        assert!(approx_eq(board.width, 55.0));
        assert!(approx_eq(board.depth, 80.0));
        assert!(approx_eq(board.thickness, 1.6));
        assert!(approx_eq(board.centre_x(), 27.5));
    }
}
