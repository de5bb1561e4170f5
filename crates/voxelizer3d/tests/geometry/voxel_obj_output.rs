use voxelizer3d::math::Vector;
use voxelizer3d::shape::Mesh;
use voxelizer3d::transformation::voxelization::{voxelize, RayParityClassifier};

#[test]
fn voxel_grid_obj_output() {
    let mut cube = Mesh::unit_cube();
    cube.rescale().unwrap();
    let grid = voxelize(&cube, 6, &RayParityClassifier::default())
        .unwrap()
        .grid;
    let num_inside = grid.num_inside();
    assert!(num_inside > 0);

    let voxels = grid.to_trimesh().unwrap();
    assert_eq!(voxels.vertices().len(), 8 * num_inside);
    assert_eq!(voxels.triangles().len(), 12 * num_inside);

    let aabb = voxels.bounding_box().unwrap();
    assert!(aabb.mins.x >= grid.origin().x);
    let far_corner = grid.origin() + Vector::repeat(grid.spacing() * 6.0);
    assert!(aabb.maxs.x <= far_corner.x);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voxels.obj");
    voxels.to_obj_file(&path).unwrap();

    let loaded = Mesh::from_obj_file(&path).unwrap();
    assert_eq!(loaded.triangles(), voxels.triangles());
    assert_eq!(loaded.vertices(), voxels.vertices());
}
