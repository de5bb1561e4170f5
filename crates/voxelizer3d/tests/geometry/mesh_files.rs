use std::fs;

use approx::assert_relative_eq;
use voxelizer3d::math::{Point, Vector};
use voxelizer3d::shape::Mesh;
use voxelizer3d::transformation::{load_mesh, MeshIoError};

#[test]
fn obj_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("box.obj");

    let mut mesh = Mesh::cuboid(&Point::new(0.0, 0.0, 0.0), &Point::new(2.0, 1.0, 0.5));
    mesh.append(&Mesh::cuboid(
        &Point::new(4.0, 4.0, 4.0),
        &Point::new(4.25, 4.5, 5.0),
    ))
    .unwrap();
    mesh.to_obj_file(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("vt "));
    assert_eq!(text.lines().last(), Some("#end"));

    let loaded = load_mesh(&path, false).unwrap();
    assert_eq!(loaded.vertices(), mesh.vertices());
    assert_eq!(loaded.triangles(), mesh.triangles());
    assert_eq!(loaded.normals(), mesh.normals());
}

#[test]
fn load_mesh_normalizes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("box.OBJ");
    Mesh::cuboid(&Point::new(-2.0, -2.0, -2.0), &Point::new(6.0, 2.0, 2.0))
        .to_obj_file(&path)
        .unwrap();

    let mesh = load_mesh(&path, true).unwrap();
    let aabb = mesh.bounding_box().unwrap();
    assert_relative_eq!(aabb.mins, Point::origin());
    assert_relative_eq!(aabb.extents(), Vector::new(1.0, 0.5, 0.5));
}

#[test]
fn load_ply_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tetra.ply");
    fs::write(
        &path,
        "ply
format ascii 1.0
comment a tetrahedron
element vertex 4
property float x
property float y
property float z
property float s
property float t
element face 4
property list uchar int vertex_indices
end_header
0 0 0 0 0
1 0 0 1 0
0 1 0 0 1
0 0 1 0.5 0.5
3 0 2 1
3 0 1 3
3 0 3 2
3 1 2 3
",
    )
    .unwrap();

    let mesh = load_mesh(&path, false).unwrap();
    assert_eq!(mesh.vertices().len(), 4);
    assert_eq!(mesh.triangles().len(), 4);
    assert_eq!(mesh.tex_coords()[1].y, 1.0);
    assert_eq!(mesh.tex_coords()[2].y, 0.0);

    // Outward windings: the normal of the origin corner points away from the tetrahedron.
    let n = mesh.normals()[0];
    assert!(n.x < 0.0 && n.y < 0.0 && n.z < 0.0);
}

#[test]
fn unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mesh.stl");
    fs::write(&path, "solid nothing\nendsolid nothing\n").unwrap();

    assert!(matches!(
        load_mesh(&path, true),
        Err(MeshIoError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_mesh(dir.path().join("missing.obj"), true),
        Err(MeshIoError::Io(_))
    ));
}
