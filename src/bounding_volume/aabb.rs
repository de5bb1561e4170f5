//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};
use crate::query::Ray;

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners:
///
/// - **mins**: the point with the smallest coordinates on each axis,
/// - **maxs**: the point with the largest coordinates on each axis,
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z`.
///
/// The bounding box of a mesh drives the geometry of the voxel grid built around it: its
/// minimum corner anchors the grid and its largest extent fixes the voxel spacing.
///
/// # Example
///
/// ```
/// use voxelizer3d::bounding_volume::Aabb;
/// use voxelizer3d::math::{Point, Vector};
///
/// let aabb = Aabb::new(Point::new(-2.0, -2.0, -2.0), Point::new(6.0, 2.0, 2.0));
/// assert_eq!(aabb.extents(), Vector::new(8.0, 4.0, 4.0));
/// assert_eq!(aabb.max_extent(), 8.0);
/// ```
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new Aabb.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The largest of the three extents of this `Aabb`.
    #[inline]
    pub fn max_extent(&self) -> Real {
        self.extents().max()
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Tests if a ray starting at `ray.origin` hits this `Aabb` for a time of impact in
    /// `[0, max_toi]`.
    ///
    /// This is the slab test; it is used to discard triangles before running the exact
    /// ray/triangle intersection.
    pub fn intersects_local_ray(&self, ray: &Ray, max_toi: Real) -> bool {
        let mut tmin: Real = 0.0;
        let mut tmax: Real = max_toi;

        for i in 0usize..DIM {
            if ray.dir[i] == 0.0 {
                if ray.origin[i] < self.mins[i] || ray.origin[i] > self.maxs[i] {
                    return false;
                }
            } else {
                let denom = 1.0 / ray.dir[i];
                let mut inter_with_near_halfspace = (self.mins[i] - ray.origin[i]) * denom;
                let mut inter_with_far_halfspace = (self.maxs[i] - ray.origin[i]) * denom;

                if inter_with_near_halfspace > inter_with_far_halfspace {
                    core::mem::swap(
                        &mut inter_with_near_halfspace,
                        &mut inter_with_far_halfspace,
                    )
                }

                tmin = tmin.max(inter_with_near_halfspace);
                tmax = tmax.min(inter_with_far_halfspace);

                if tmin > tmax {
                    // This covers the case where tmax is negative because tmin is
                    // initialized at zero.
                    return false;
                }
            }
        }

        true
    }
}
