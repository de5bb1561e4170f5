use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// Computes the AABB of a set of points.
///
/// Returns `None` if the iterator yields no point: the bounding box of an empty point cloud
/// is undefined.
pub fn local_point_cloud_aabb<I>(pts: I) -> Option<Aabb>
where
    I: IntoIterator<Item = Point<Real>>,
{
    let mut it = pts.into_iter();

    let p0 = it.next()?;
    let mut aabb = Aabb::new(p0, p0);

    for pt in it {
        aabb.take_point(pt);
    }

    Some(aabb)
}
