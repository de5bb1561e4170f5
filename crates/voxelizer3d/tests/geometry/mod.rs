mod binvox_round_trip;
mod cube_voxelization;
#[cfg(feature = "wavefront")]
mod mesh_files;
#[cfg(feature = "wavefront")]
mod voxel_obj_output;
