//! OpenSCAD script output.

use std::fmt::Write;

use crate::document::{Document, DocumentObject};
use crate::geometry::{Dimensions, Vector3};

/// Facet count for cylinders.
const CYLINDER_FACETS: u32 = 48;

/// Renders a document as an OpenSCAD script.
///
/// OpenSCAD's `cube` and `cylinder` use the same local frames as the document
/// primitives, so each object maps to `translate(rotate(solid))`.
#[must_use]
pub fn to_openscad(doc: &Document) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "// {}", doc.name());
    let _ = writeln!(out, "// uid {}", doc.uid());
    for obj in doc.objects() {
        out.push('\n');
        write_object(&mut out, obj);
    }
    out
}

fn write_object(out: &mut String, obj: &DocumentObject) {
    let c = obj.color;
    let p = obj.placement.position;
    let _ = writeln!(out, "// {}", obj.name);
    let _ = write!(out, "color([{}, {}, {}]) translate({})", c.r, c.g, c.b, vector(&p));

    let rotation = obj.placement.rotation;
    if !rotation.is_identity() {
        let _ = write!(out, " rotate(a = {}, v = {})", rotation.angle, vector(&rotation.axis));
    }

    let _ = match obj.dimensions {
        Dimensions::Box {
            length,
            width,
            height,
        } => writeln!(out, " cube([{length}, {width}, {height}]);"),
        Dimensions::Cylinder { radius, height } => writeln!(
            out,
            " cylinder(r = {radius}, h = {height}, $fn = {CYLINDER_FACETS});"
        ),
    };
}

fn vector(v: &Vector3) -> String {
    format!("[{}, {}, {}]", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CadHost, NamePolicy};
    use crate::geometry::{Color, Placement, PrimitiveKind, Rotation};

    #[test]
    fn box_statement() {
        let mut doc = Document::new("Scad", NamePolicy::Reuse);
        let h = doc.create_primitive(PrimitiveKind::Box, "C1").unwrap();
        doc.set_geometry(h, Dimensions::cuboid(2.0, 1.5, 1.0)).unwrap();
        doc.set_placement(h, Placement::at(12.5, 20.0, 2.0)).unwrap();
        doc.set_color(h, Color::rgb(0.5, 0.25, 0.0)).unwrap();

        let scad = to_openscad(&doc);
        assert!(scad.starts_with("// Scad\n"));
        assert!(scad.contains(
            "// C1\ncolor([0.5, 0.25, 0]) translate([12.5, 20, 2]) cube([2, 1.5, 1]);\n"
        ));
    }

    #[test]
    fn rotated_cylinder_statement() {
        let mut doc = Document::new("Scad", NamePolicy::Reuse);
        let h = doc.create_primitive(PrimitiveKind::Cylinder, "Pin").unwrap();
        doc.set_geometry(h, Dimensions::cylinder(2.0, 10.0)).unwrap();
        doc.set_placement(
            h,
            Placement::at(1.0, 3.0, 4.0).rotated(Rotation::new(Vector3::X, 90.0)),
        )
        .unwrap();

        let scad = to_openscad(&doc);
        assert!(scad.contains("translate([1, 3, 4]) rotate(a = 90, v = [1, 0, 0]) cylinder(r = 2, h = 10, $fn = 48);"));
    }

    #[test]
    fn identity_rotation_omitted() {
        let mut doc = Document::new("Scad", NamePolicy::Reuse);
        doc.create_primitive(PrimitiveKind::Box, "A").unwrap();
        assert!(!to_openscad(&doc).contains("rotate"));
    }
}
