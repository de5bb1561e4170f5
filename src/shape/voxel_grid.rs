use crate::math::{Point, Real, Vector};

/// Error raised when the storage of a voxel grid cannot be allocated.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoxelGridError {
    /// The requested number of voxels overflows `usize` or could not be reserved.
    #[error("unable to allocate a voxel grid of dimensions {dims:?}.")]
    AllocationFailure {
        /// The requested dimensions.
        dims: [u32; 3],
    },
}

/// A dense grid of boolean occupancy values.
///
/// The voxel `(i, j, k)` is stored at the linear index `k * (dim_x * dim_y) + j * dim_y + i`.
/// This addressing is part of the contract of the grid: classifiers write through it and the
/// binvox exporter reads through it. It only maps distinct voxels to distinct cells when
/// `dim_x == dim_y`, which is always the case for grids produced by
/// [`voxelize`](crate::transformation::voxelization::voxelize).
///
/// The voxel `(i, j, k)` covers the cube
/// `[origin + (i, j, k) * spacing, origin + (i + 1, j + 1, k + 1) * spacing]`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    origin: Point<Real>,
    dims: [u32; 3],
    spacing: Real,
    data: Vec<bool>,
}

impl VoxelGrid {
    /// Allocates a new grid where every voxel is outside.
    ///
    /// Fails if `dim_x * dim_y * dim_z` overflows or if the memory cannot be reserved.
    pub fn new(
        origin: Point<Real>,
        dim_x: u32,
        dim_y: u32,
        dim_z: u32,
        spacing: Real,
    ) -> Result<Self, VoxelGridError> {
        let dims = [dim_x, dim_y, dim_z];
        let failure = VoxelGridError::AllocationFailure { dims };
        let len = (dim_x as usize)
            .checked_mul(dim_y as usize)
            .and_then(|n| n.checked_mul(dim_z as usize))
            .ok_or(failure)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| failure)?;
        data.resize(len, false);

        Ok(Self {
            origin,
            dims,
            spacing,
            data,
        })
    }

    /// The linear index of the voxel `(i, j, k)`.
    #[inline]
    pub fn linear_index(&self, i: u32, j: u32, k: u32) -> usize {
        let [dim_x, dim_y, _] = self.dims;
        k as usize * (dim_x as usize * dim_y as usize) + j as usize * dim_y as usize + i as usize
    }

    /// Is the voxel `(i, j, k)` inside of the voxelized shape?
    ///
    /// # Panics
    ///
    /// Panics if the linear index of `(i, j, k)` is out of bounds.
    #[inline]
    pub fn is_inside(&self, i: u32, j: u32, k: u32) -> bool {
        self.data[self.linear_index(i, j, k)]
    }

    /// A mutable reference to the state of the voxel `(i, j, k)`.
    ///
    /// # Panics
    ///
    /// Panics if the linear index of `(i, j, k)` is out of bounds.
    #[inline]
    pub fn is_inside_mut(&mut self, i: u32, j: u32, k: u32) -> &mut bool {
        let id = self.linear_index(i, j, k);
        &mut self.data[id]
    }

    /// The position of the minimum corner of the voxel `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The number of voxels along each axis.
    #[inline]
    pub fn dims(&self) -> [u32; 3] {
        self.dims
    }

    /// The number of voxels along the `x` axis.
    #[inline]
    pub fn dim_x(&self) -> u32 {
        self.dims[0]
    }

    /// The number of voxels along the `y` axis.
    #[inline]
    pub fn dim_y(&self) -> u32 {
        self.dims[1]
    }

    /// The number of voxels along the `z` axis.
    #[inline]
    pub fn dim_z(&self) -> u32 {
        self.dims[2]
    }

    /// The edge length of each voxel.
    #[inline]
    pub fn spacing(&self) -> Real {
        self.spacing
    }

    /// The total number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Does this grid contain zero voxels?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The number of voxels marked as inside.
    pub fn num_inside(&self) -> usize {
        self.data.iter().filter(|v| **v).count()
    }

    /// The center of the voxel `(i, j, k)`.
    #[inline]
    pub fn voxel_center(&self, i: u32, j: u32, k: u32) -> Point<Real> {
        let ijk = Vector::new(i as Real, j as Real, k as Real);
        self.origin + (ijk + Vector::repeat(0.5)) * self.spacing
    }

    /// The raw occupancy values, in linear index order.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }
}
