use std::path::PathBuf;

use asset::{ObjError, VertexLayout, load_obj_from_path};
use glam::Vec3;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn loads_pyramid_from_disk() {
    let mesh = load_obj_from_path(fixture("pyramid.obj")).expect("load pyramid");

    assert_eq!(mesh.positions.len(), 5);
    assert_eq!(mesh.normals.len(), 5);
    assert_eq!(mesh.faces.len(), 6);
    assert!(mesh.has_normals);
    assert_eq!(mesh.layout(), VertexLayout::PositionNormal);
    assert_eq!(mesh.vertex_count(), 18);
    assert_eq!(mesh.draw_buffer.len(), 6 * 3 * 6);
    assert_eq!(mesh.draw_bytes().len(), mesh.vertex_count() * mesh.stride_bytes());

    assert_eq!(mesh.bounds.min, Vec3::ZERO);
    assert_eq!(mesh.bounds.max, Vec3::new(2.0, 3.0, 2.0));
    assert_eq!(mesh.center, Vec3::new(1.0, 1.5, 1.0));

    // Third face, second corner is the apex with the -Z facing normal.
    let apex = 2 * 3 * 6 + 6;
    assert_eq!(&mesh.draw_buffer[apex..apex + 6], &[1.0, 3.0, 1.0, 0.0, 0.3, -0.9]);
}

#[test]
fn missing_file_reports_path() {
    let path = fixture("missing.obj");
    match load_obj_from_path(&path) {
        Err(ObjError::NotFound { path: p }) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn path_through_a_file_is_an_open_error() {
    // A regular file used as a directory fails with ENOTDIR, not ENOENT.
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("Cargo.toml")
        .join("child.obj");
    let err = load_obj_from_path(&path).unwrap_err();
    assert!(matches!(err, ObjError::Open { .. }), "{err:?}");
}
