use voxelizer3d::math::Point;
use voxelizer3d::shape::{Mesh, VoxelGrid};
use voxelizer3d::transformation::voxelization::{
    voxelize, InsideClassifier, RayParityClassifier, RaySampling,
};

const RESOLUTION: u32 = 8;

fn voxelize_cube(sampling: RaySampling) -> VoxelGrid {
    let mut cube = Mesh::cuboid(&Point::new(-3.0, 1.0, 2.0), &Point::new(1.0, 5.0, 6.0));
    cube.rescale().unwrap();
    voxelize(&cube, RESOLUTION, &RayParityClassifier::new(sampling))
        .unwrap()
        .grid
}

fn check_cube(grid: &VoxelGrid) {
    assert_eq!(grid.dims(), [RESOLUTION; 3]);
    // Voxel centers are at i / 6 on each axis: 1..=5 are strictly inside the unit cube, 7 is
    // in the padding layer.
    for k in 0..RESOLUTION {
        for j in 0..RESOLUTION {
            for i in 0..RESOLUTION {
                let ijk = [i, j, k];
                if ijk.iter().all(|e| (1..=5).contains(e)) {
                    assert!(grid.is_inside(i, j, k), "voxel {i} {j} {k} should be inside");
                }
                if ijk.contains(&(RESOLUTION - 1)) {
                    assert!(!grid.is_inside(i, j, k), "voxel {i} {j} {k} should be outside");
                }
            }
        }
    }

    assert!(grid.num_inside() >= 125);
    assert!(grid.num_inside() <= 343);
}

#[test]
fn cube_with_canonical_direction() {
    check_cube(&voxelize_cube(RaySampling::Canonical));
}

#[test]
fn cube_with_sampled_directions() {
    check_cube(&voxelize_cube(RaySampling::Sampled(5)));
}

#[test]
fn classification_is_deterministic() {
    for sampling in [RaySampling::Canonical, RaySampling::Sampled(3)] {
        assert_eq!(voxelize_cube(sampling), voxelize_cube(sampling));
    }
}

#[test]
fn classifier_overwrites_previous_state() {
    let cube = Mesh::unit_cube();
    let classifier = RayParityClassifier::new(RaySampling::Sampled(0));
    let reference = voxelize(&cube, 6, &classifier).unwrap().grid;

    let mut grid = reference.clone();
    for k in 0..6 {
        for j in 0..6 {
            for i in 0..6 {
                let state = grid.is_inside_mut(i, j, k);
                *state = !*state;
            }
        }
    }

    classifier.classify(&cube.triangles_by_value(), &mut grid);
    assert_eq!(grid, reference);
}
