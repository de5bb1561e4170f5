//! Voxelization of a closed triangle mesh into a dense occupancy grid.

pub use self::classifier::{InsideClassifier, RayParityClassifier, RaySampling};
pub use self::grid_geometry::GridGeometry;
pub use self::voxelize::{voxelize, VoxelizeError, VoxelizedMesh};

mod classifier;
mod grid_geometry;
mod voxelize;
