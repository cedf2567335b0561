//! Integration tests for building the beacon into documents.
//!
//! These tests cover document lookup, rebuild behaviour under each name
//! policy, and the recomputed bounds.

use beacon_assembly::document::{
    build_assembly, build_beacon, CadHost, Document, Lookup, NamePolicy, Workspace,
};
use beacon_assembly::geometry::{BoardSpec, PrimitiveKind, Vector3};
use beacon_assembly::layout::{self, beacon};

const DOC: &str = "Beacon_Assembly";

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn vec_approx_eq(a: Vector3, b: Vector3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

#[test]
fn test_first_build_creates_document() {
    let mut ws = Workspace::new(NamePolicy::Reuse);
    let report = build_beacon(&mut ws, DOC, &BoardSpec::default()).unwrap();

    assert_eq!(report.lookup, Lookup::Created);
    let doc = ws.get(DOC).unwrap();
    assert_eq!(doc.len(), beacon::PART_COUNT);
    assert!(!doc.needs_recompute());
}

#[test]
fn test_rebuild_with_reuse_is_idempotent() {
    let mut ws = Workspace::new(NamePolicy::Reuse);
    let first = build_beacon(&mut ws, DOC, &BoardSpec::default()).unwrap();
    let second = build_beacon(&mut ws, DOC, &BoardSpec::default()).unwrap();

    assert_eq!(second.lookup, Lookup::Found);
    assert_eq!(first.objects, second.objects);
    assert_eq!(ws.get(DOC).unwrap().len(), beacon::PART_COUNT);
}

#[test]
fn test_rebuild_with_reuse_applies_new_board() {
    let mut ws = Workspace::new(NamePolicy::Reuse);
    build_beacon(&mut ws, DOC, &BoardSpec::default()).unwrap();
    build_beacon(&mut ws, DOC, &BoardSpec::new(60.0, 90.0, 1.0)).unwrap();

    let doc = ws.get(DOC).unwrap();
    let esp = doc.get("ESP32").unwrap();
    assert!(approx_eq(esp.placement.position.x, 16.0));
    assert!(approx_eq(esp.placement.position.y, 36.0));
}

#[test]
fn test_rebuild_with_rename_suffixes_names() {
    let mut ws = Workspace::new(NamePolicy::Rename);
    build_beacon(&mut ws, DOC, &BoardSpec::default()).unwrap();
    let second = build_beacon(&mut ws, DOC, &BoardSpec::default()).unwrap();

    assert_eq!(ws.get(DOC).unwrap().len(), 2 * beacon::PART_COUNT);
    assert_eq!(second.objects[0], "PCB001");
    assert!(second.objects.iter().all(|n| n.ends_with("001")));
}

#[test]
fn test_separate_documents_are_independent() {
    let mut ws = Workspace::new(NamePolicy::Reuse);
    build_beacon(&mut ws, "A", &BoardSpec::default()).unwrap();
    let report = build_beacon(&mut ws, "B", &BoardSpec::default()).unwrap();

    assert_eq!(report.lookup, Lookup::Created);
    assert_eq!(ws.documents().count(), 2);
}

#[test]
fn test_pcb_bounds_after_recompute() {
    let mut ws = Workspace::new(NamePolicy::Reuse);
    build_beacon(&mut ws, DOC, &BoardSpec::default()).unwrap();

    let pcb = ws.get(DOC).unwrap().get("PCB").unwrap();
    let bounds = pcb.bounds.unwrap();
    assert!(vec_approx_eq(bounds.min, Vector3::new(0.0, 0.0, 0.0)));
    assert!(vec_approx_eq(bounds.max, Vector3::new(55.0, 80.0, 1.6)));
}

#[test]
fn test_view_fits_whole_assembly() {
    let mut ws = Workspace::new(NamePolicy::Reuse);
    build_beacon(&mut ws, DOC, &BoardSpec::default()).unwrap();

    let view = ws.get(DOC).unwrap().view().unwrap();
    // OLED sits 4 mm past the near edge, the SMA pin 7 mm.
    assert!(approx_eq(view.min.y, -7.0));
    assert!(approx_eq(view.max.y, 80.0));
    assert!(approx_eq(view.min.x, 0.0));
    assert!(approx_eq(view.max.x, 55.0));
    assert!(approx_eq(view.min.z, 0.0));
    assert!(approx_eq(view.max.z, 1.6 + 13.0));
}

#[test]
fn test_object_kinds_match_layout() {
    let mut doc = Document::new(DOC, NamePolicy::Reuse);
    let parts = layout::generate(&BoardSpec::default());
    let handles = build_assembly(&mut doc, &parts).unwrap();

    for (handle, part) in handles.iter().zip(&parts) {
        let obj = doc.object(*handle).unwrap();
        assert_eq!(obj.name, part.name);
        assert_eq!(obj.kind(), part.kind());
        assert_eq!(obj.color, part.color);
        assert_eq!(obj.placement, part.placement);
    }

    let cylinders = doc
        .objects()
        .filter(|o| o.kind() == PrimitiveKind::Cylinder)
        .count();
    assert_eq!(cylinders, 4);
    assert_eq!(doc.object_name(handles[4]), Some("SMA_Pin"));
}
