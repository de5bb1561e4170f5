//! Conversion of meshes to voxel grids, and reading and writing of meshes and voxel grids.

pub use self::mesh_io::{load_mesh, MeshFormat, MeshIoError};
#[cfg(feature = "wavefront")]
pub use self::wavefront::OBJ_END_MARKER;

pub mod binvox;
mod mesh_io;
mod ply;
mod to_trimesh;
/// Voxelization of a closed triangle mesh.
pub mod voxelization;

#[cfg(feature = "wavefront")]
mod wavefront;
