//! Non-persistent geometric queries.
//!
//! Only ray-casting is needed by the voxelization pipeline: the inside/outside state of a voxel
//! center is decided by counting the triangles crossed by rays cast from it.

pub use self::ray::{local_ray_intersection_with_triangle, Ray};

mod ray;
