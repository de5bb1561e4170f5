//! Traits and structure needed to cast rays.

use crate::math::{Point, Real, Vector};

/// A ray for ray-casting queries.
///
/// A ray is a half-infinite line starting at an origin point and extending infinitely in a
/// direction. Points along the ray are `origin + dir * t` for `t ≥ 0`.
///
/// The direction does not need to be normalized, in which case times of impact are scaled by
/// `dir.norm()`.
///
/// # Example
///
/// ```
/// use voxelizer3d::math::{Point, Vector};
/// use voxelizer3d::query::Ray;
///
/// let ray = Ray::new(Point::origin(), Vector::new(1.0, 0.0, 0.0));
/// assert_eq!(ray.origin + ray.dir * 4.0, Point::new(4.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction vector of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray from an origin point and direction vector.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }
}
