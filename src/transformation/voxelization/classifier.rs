use std::f64::consts::TAU;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::query::Ray;
use crate::shape::{Triangle, VoxelGrid};

/// Decides which voxels of a grid lie inside the solid bounded by a set of triangles.
///
/// Implementors must set every voxel of `grid` to a definite state, and must be deterministic:
/// classifying the same triangles into two identical grids yields two identical grids.
pub trait InsideClassifier {
    /// Sets the state of every voxel of `grid` depending on whether its center lies inside of
    /// the solid bounded by `triangles`.
    fn classify(&self, triangles: &[Triangle], grid: &mut VoxelGrid);
}

/// The set of ray directions cast from each voxel center.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RaySampling {
    /// A single fixed direction.
    #[default]
    Canonical,
    /// The given number of pseudo-random directions, uniformly distributed on the unit sphere.
    ///
    /// The directions are generated from a fixed seed so the classification stays deterministic.
    Sampled(u32),
}

impl RaySampling {
    /// Interprets a signed sample count: negative values select the canonical direction, other
    /// values select that many sampled directions (at least one).
    pub fn from_sample_count(samples: i32) -> Self {
        if samples < 0 {
            RaySampling::Canonical
        } else {
            RaySampling::Sampled(samples.max(1) as u32)
        }
    }

    /// The ray directions of this sampling strategy.
    pub fn directions(&self) -> Vec<Vector<Real>> {
        match *self {
            // Slightly skewed so rays from voxel centers miss the edges and vertices of
            // axis-aligned geometry.
            RaySampling::Canonical => vec![Vector::new(1.0, 0.0279, 0.0417).normalize()],
            RaySampling::Sampled(n) => {
                let mut rng = oorandom::Rand64::new(RayParityClassifier::SEED);
                (0..n.max(1))
                    .map(|_| {
                        let z = 2.0 * rng.rand_float() - 1.0;
                        let phi = TAU * rng.rand_float();
                        let r = (1.0 - z * z).max(0.0).sqrt();
                        Vector::new(r * phi.cos(), r * phi.sin(), z)
                    })
                    .collect()
            }
        }
    }
}

impl From<i32> for RaySampling {
    fn from(samples: i32) -> Self {
        Self::from_sample_count(samples)
    }
}

/// Classifies points by counting the triangles crossed by rays cast from them.
///
/// For each ray direction, a point is inside if the ray crosses an odd number of triangles.
/// With several directions, the point is inside if a strict majority of them say so.
///
/// This assumes a closed mesh. Triangles are culled with their bounding boxes before the exact
/// ray/triangle test.
#[derive(Clone, Debug, PartialEq)]
pub struct RayParityClassifier {
    sampling: RaySampling,
    directions: Vec<Vector<Real>>,
}

impl Default for RayParityClassifier {
    fn default() -> Self {
        Self::new(RaySampling::Canonical)
    }
}

impl RayParityClassifier {
    /// The seed of the pseudo-random generator of sampled ray directions.
    pub const SEED: u128 = 0x5eed_b1b0_c0de;

    /// Creates a classifier casting rays along the directions of `sampling`.
    pub fn new(sampling: RaySampling) -> Self {
        Self {
            sampling,
            directions: sampling.directions(),
        }
    }

    /// The sampling strategy of this classifier.
    pub fn sampling(&self) -> RaySampling {
        self.sampling
    }

    /// The directions of the rays cast from each point.
    pub fn directions(&self) -> &[Vector<Real>] {
        &self.directions
    }

    /// Is `point` inside of the solid bounded by `triangles`?
    pub fn contains_point(&self, triangles: &[Triangle], point: &Point<Real>) -> bool {
        let culled = with_aabbs(triangles);
        self.vote(&culled, point)
    }

    fn vote(&self, triangles: &[(Triangle, Aabb)], point: &Point<Real>) -> bool {
        let num_inside = self
            .directions
            .iter()
            .filter(|dir| {
                let ray = Ray::new(*point, **dir);
                let num_crossings = triangles
                    .iter()
                    .filter(|(tri, aabb)| {
                        aabb.intersects_local_ray(&ray, Real::MAX) && tri.ray_crosses(&ray)
                    })
                    .count();
                num_crossings % 2 == 1
            })
            .count();

        num_inside * 2 > self.directions.len()
    }
}

impl InsideClassifier for RayParityClassifier {
    fn classify(&self, triangles: &[Triangle], grid: &mut VoxelGrid) {
        let culled = with_aabbs(triangles);
        let [dim_x, dim_y, dim_z] = grid.dims();

        log::debug!(
            "Classifying {}x{}x{} voxels against {} triangles with {} ray direction(s).",
            dim_x,
            dim_y,
            dim_z,
            triangles.len(),
            self.directions.len()
        );

        #[cfg(not(feature = "parallel"))]
        {
            for k in 0..dim_z {
                for j in 0..dim_y {
                    for i in 0..dim_x {
                        let inside = self.vote(&culled, &grid.voxel_center(i, j, k));
                        *grid.is_inside_mut(i, j, k) = inside;
                    }
                }
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let voxels: Vec<[u32; 3]> = (0..dim_z)
                .flat_map(|k| (0..dim_y).flat_map(move |j| (0..dim_x).map(move |i| [i, j, k])))
                .collect();
            let states: Vec<bool> = voxels
                .par_iter()
                .map(|[i, j, k]| self.vote(&culled, &grid.voxel_center(*i, *j, *k)))
                .collect();

            // Written back sequentially: distinct voxels may share a cell when dim_x != dim_y.
            for ([i, j, k], inside) in voxels.into_iter().zip(states) {
                *grid.is_inside_mut(i, j, k) = inside;
            }
        }
    }
}

fn with_aabbs(triangles: &[Triangle]) -> Vec<(Triangle, Aabb)> {
    triangles.iter().map(|tri| (*tri, tri.local_aabb())).collect()
}
