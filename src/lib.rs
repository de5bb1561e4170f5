/*!
voxelizer3d
===========

**voxelizer3d** turns a closed triangle mesh into a dense voxel occupancy grid and writes it
out as a [binvox](https://www.patrickmin.com/binvox/binvox.html) file.

The pipeline is:

1. load a [`Mesh`](shape::Mesh) (OBJ or PLY) and rescale it to the unit box,
2. derive the [`GridGeometry`](transformation::voxelization::GridGeometry) from its bounding box,
3. classify every voxel center with an
   [`InsideClassifier`](transformation::voxelization::InsideClassifier),
4. export the [`VoxelGrid`](shape::VoxelGrid) with
   [`save_binvox`](transformation::binvox::save_binvox).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    pub use f64 as Real;
}

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Point3, Vector3};

    /// The default tolerance used for geometric operations.
    ///
    /// Vectors with a norm smaller than this are considered degenerate and are never divided
    /// by their norm.
    pub const DEFAULT_EPSILON: Real = 1.0e-9;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The texture coordinate type.
    pub type TexCoord = Point2<Real>;

    /// Three indices into a vertex (or texture coordinate) buffer.
    pub type IndexTriple = [u32; 3];
}
