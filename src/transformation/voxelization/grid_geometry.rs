use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::{VoxelGrid, VoxelGridError};
use crate::transformation::voxelization::VoxelizeError;

/// The placement of a cubic voxel grid around a bounding box.
///
/// For a resolution `dim`, the largest extent of the box spans `dim - 2` voxels and the grid is
/// shifted by half a voxel below the box minimum, leaving room for a padding layer around the
/// shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridGeometry {
    /// The minimum corner of the grid.
    pub origin: Point<Real>,
    /// The number of voxels along each axis.
    pub resolution: u32,
    /// The edge length of a voxel.
    pub spacing: Real,
}

impl GridGeometry {
    /// The smallest supported resolution.
    pub const MIN_RESOLUTION: u32 = 3;

    /// Computes the grid geometry enclosing `aabb` with `resolution` voxels per axis.
    pub fn from_aabb(aabb: &Aabb, resolution: u32) -> Result<Self, VoxelizeError> {
        if resolution < Self::MIN_RESOLUTION {
            return Err(VoxelizeError::InvalidResolution(resolution));
        }

        let max_extent = aabb.max_extent();

        if max_extent <= 0.0 || !max_extent.is_finite() {
            return Err(VoxelizeError::DegenerateBounds);
        }

        let spacing = max_extent / (resolution - 2) as Real;
        let origin = aabb.mins - Vector::repeat(0.5 * spacing);

        Ok(Self {
            origin,
            resolution,
            spacing,
        })
    }

    /// The number of voxels along the `x`, `y` and `z` axes.
    #[inline]
    pub fn dims(&self) -> [u32; 3] {
        [self.resolution; 3]
    }

    /// Allocates an empty voxel grid with this geometry.
    pub fn allocate(&self) -> Result<VoxelGrid, VoxelGridError> {
        VoxelGrid::new(
            self.origin,
            self.resolution,
            self.resolution,
            self.resolution,
            self.spacing,
        )
    }
}
