//! Integration tests for document export.

use beacon_assembly::document::{build_beacon, NamePolicy, Workspace};
use beacon_assembly::export::{self, DocumentSnapshot, ExportFormat};
use beacon_assembly::geometry::BoardSpec;
use beacon_assembly::layout::beacon;

fn built_workspace() -> Workspace {
    let mut ws = Workspace::new(NamePolicy::Reuse);
    build_beacon(&mut ws, "Beacon_Assembly", &BoardSpec::default()).unwrap();
    ws
}

#[test]
fn test_json_export_to_file() {
    let ws = built_workspace();
    let doc = ws.get("Beacon_Assembly").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beacon.json");

    export::export(doc, ExportFormat::Json, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let snapshot: DocumentSnapshot = serde_json::from_str(&contents).unwrap();
    assert_eq!(snapshot.name, "Beacon_Assembly");
    assert_eq!(snapshot.objects.len(), beacon::PART_COUNT);
    assert!(snapshot.objects.iter().all(|o| o.bounds.is_some()));
    assert!(snapshot.view.is_some());
    assert_eq!(snapshot.objects[4].name, "SMA_Pin");
}

#[test]
fn test_scad_export_to_file() {
    let ws = built_workspace();
    let doc = ws.get("Beacon_Assembly").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beacon.scad");

    export::export(doc, ExportFormat::Scad, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("// Beacon_Assembly\n"));
    assert_eq!(contents.matches("cube(").count(), 8);
    assert_eq!(contents.matches("cylinder(").count(), 4);
    assert_eq!(contents.matches("rotate(").count(), 1);
    assert!(contents.contains("// PCB\ncolor([0, 0.5, 0]) translate([0, 0, 0]) cube([55, 80, 1.6]);"));
    assert!(contents.contains("rotate(a = 90, v = [1, 0, 0]) cylinder(r = 2, h = 10"));
}

#[test]
fn test_render_matches_export() {
    let ws = built_workspace();
    let doc = ws.get("Beacon_Assembly").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beacon.scad");

    export::export(doc, ExportFormat::Scad, &path).unwrap();
    let rendered = export::render(doc, ExportFormat::Scad).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);
}
