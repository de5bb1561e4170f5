use crate::shape::{Mesh, MeshError, VoxelGrid, VoxelGridError};
use crate::transformation::voxelization::{GridGeometry, InsideClassifier};

/// Errors that can occur while voxelizing a mesh.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum VoxelizeError {
    /// The mesh geometry is unusable.
    #[error(transparent)]
    Geometry(#[from] MeshError),
    /// The voxel grid could not be allocated.
    #[error(transparent)]
    Grid(#[from] VoxelGridError),
    /// The requested resolution is too small to hold the shape and its padding.
    #[error("the voxelization resolution must be at least 3, got {0}.")]
    InvalidResolution(u32),
    /// The mesh bounding box has a zero extent along every axis.
    #[error("the mesh bounding box is degenerate, unable to derive a voxel spacing.")]
    DegenerateBounds,
}

/// The result of [`voxelize`].
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelizedMesh {
    /// The classified voxel grid.
    pub grid: VoxelGrid,
    /// The number of triangles handed to the classifier.
    pub num_triangles: usize,
}

/// Voxelizes `mesh` on a cubic grid with `resolution` voxels per axis.
///
/// The grid geometry is derived from the mesh bounding box (see [`GridGeometry`]), then
/// `classifier` decides the state of each voxel.
pub fn voxelize(
    mesh: &Mesh,
    resolution: u32,
    classifier: &impl InsideClassifier,
) -> Result<VoxelizedMesh, VoxelizeError> {
    let aabb = mesh.bounding_box()?;
    let geometry = GridGeometry::from_aabb(&aabb, resolution)?;
    let mut grid = geometry.allocate()?;

    log::debug!(
        "Voxel grid: origin {:?}, spacing {}, {} voxels.",
        geometry.origin,
        geometry.spacing,
        grid.len()
    );

    let triangles = mesh.triangles_by_value();
    classifier.classify(&triangles, &mut grid);

    log::info!(
        "Voxelized {} triangles, {} of {} voxels are inside.",
        triangles.len(),
        grid.num_inside(),
        grid.len()
    );

    Ok(VoxelizedMesh {
        grid,
        num_triangles: triangles.len(),
    })
}
