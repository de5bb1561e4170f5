use crate::bounding_volume::Aabb;
use crate::shape::Triangle;

impl Triangle {
    /// Computes the local-space [`Aabb`] of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        let mins = self.a.inf(&self.b).inf(&self.c);
        let maxs = self.a.sup(&self.b).sup(&self.c);
        Aabb::new(mins, maxs)
    }
}
