use crate::math::{Point, Real};
use crate::query::Ray;
use crate::shape::Triangle;

impl Triangle {
    /// Does the ray cross this triangle strictly after its origin?
    ///
    /// This is the predicate used for parity counting: a hit at `t = 0` (ray origin lying on the
    /// triangle) is not a crossing. Both faces of the triangle are considered.
    #[inline]
    pub fn ray_crosses(&self, ray: &Ray) -> bool {
        matches!(
            local_ray_intersection_with_triangle(&self.a, &self.b, &self.c, ray),
            Some(toi) if toi > 0.0
        )
    }
}

/// Computes the time of impact between a triangle and a ray.
///
/// Both faces of the triangle are considered and points on the triangle edges count as hits.
/// Returns `None` if the ray misses the triangle or is parallel to its plane.
pub fn local_ray_intersection_with_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    ray: &Ray,
) -> Option<Real> {
    let ab = *b - *a;
    let ac = *c - *a;

    // normal
    let n = ab.cross(&ac);
    let d = n.dot(&ray.dir);

    // the normal and the ray direction are parallel
    if d == 0.0 {
        return None;
    }

    let ap = ray.origin - *a;
    let t = ap.dot(&n);

    // the ray does not intersect the halfspace defined by the triangle
    if (t < 0.0 && d < 0.0) || (t > 0.0 && d > 0.0) {
        return None;
    }

    let d = d.abs();

    //
    // intersection: compute barycentric coordinates
    //
    let e = -ray.dir.cross(&ap);

    let (v, w) = if t < 0.0 {
        (-ac.dot(&e), ab.dot(&e))
    } else {
        (ac.dot(&e), -ab.dot(&e))
    };

    if v < 0.0 || v > d || w < 0.0 || v + w > d {
        return None;
    }

    Some(t.abs() / d)
}
