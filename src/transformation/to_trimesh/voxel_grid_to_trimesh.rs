use crate::math::{Real, Vector};
use crate::shape::{Mesh, MeshError, VoxelGrid};

impl VoxelGrid {
    /// Computes a mesh made of one axis-aligned cube per inside voxel.
    ///
    /// The cube of the voxel `(i, j, k)` spans from `origin + (i, j, k) * spacing` to
    /// `origin + (i + 1, j + 1, k + 1) * spacing`. Each cube has its own 8 vertices and 12
    /// triangles: shared corners and internal faces are not merged.
    ///
    /// Fails with [`MeshError::TooManyVertices`] if the cubes need more vertices than `u32`
    /// indices can address.
    pub fn to_trimesh(&self) -> Result<Mesh, MeshError> {
        let mut result = Mesh::empty();
        let [dim_x, dim_y, dim_z] = self.dims();

        for k in 0..dim_z {
            for j in 0..dim_y {
                for i in 0..dim_x {
                    if self.is_inside(i, j, k) {
                        let ijk = Vector::new(i as Real, j as Real, k as Real);
                        let mins = self.origin() + ijk * self.spacing();
                        let maxs = mins + Vector::repeat(self.spacing());
                        result.append(&Mesh::cuboid(&mins, &maxs))?;
                    }
                }
            }
        }

        Ok(result)
    }
}
