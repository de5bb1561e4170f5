//! Triangle mesh generation from voxel grids.
//!
//! [`VoxelGrid::to_trimesh`](crate::shape::VoxelGrid::to_trimesh) emits one cube per inside
//! voxel, which is how a voxelization is saved in the OBJ format.

mod voxel_grid_to_trimesh;
