//! Shapes handled by the voxelizer: triangles, indexed meshes and voxel grids.

pub use self::mesh::{Mesh, MeshError};
pub use self::triangle::Triangle;
pub use self::voxel_grid::{VoxelGrid, VoxelGridError};

mod mesh;
mod triangle;
mod voxel_grid;
