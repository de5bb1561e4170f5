use std::collections::HashMap;

use crate::bounding_volume::{local_point_cloud_aabb, Aabb};
use crate::math::{IndexTriple, Point, Real, TexCoord, Vector, DEFAULT_EPSILON};
use crate::shape::Triangle;
use crate::utils::{self, SortedPair};

/// Indicated an inconsistency in the geometry of a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index} (corner {corner}) but the mesh only has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The faulty triangle.
        triangle: usize,
        /// The corner (0, 1 or 2) of the triangle holding the faulty index.
        corner: usize,
        /// The faulty vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: usize,
    },
    /// A texture triangle references a texture coordinate that does not exist.
    #[error("the texture triangle {triangle} references the texture coordinate {index} (corner {corner}) but the mesh only has {num_tex_coords} texture coordinates.")]
    TexIndexOutOfBounds {
        /// The faulty texture triangle.
        triangle: usize,
        /// The corner (0, 1 or 2) of the texture triangle holding the faulty index.
        corner: usize,
        /// The faulty texture coordinate index.
        index: u32,
        /// The number of texture coordinates of the mesh.
        num_tex_coords: usize,
    },
    /// The operation needs at least one vertex.
    #[error("the mesh does not have any vertex.")]
    EmptyMesh,
    /// The mesh would have more vertices (or texture coordinates) than `u32` indices can address.
    #[error("the mesh would have {len} vertices or texture coordinates, more than the maximum of {max}.")]
    TooManyVertices {
        /// The number of elements the mesh would have.
        len: usize,
        /// The largest number of addressable elements.
        max: usize,
    },
}

/// The vertices of the cube `[0, 1]^3`.
const UNIT_CUBE_VERTICES: [[Real; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// The triangles of the cube `[0, 1]^3`, with outward-facing counter-clockwise windings.
const UNIT_CUBE_TRIANGLES: [IndexTriple; 12] = [
    [0, 3, 1],
    [1, 3, 2],
    [5, 4, 0],
    [5, 0, 1],
    [6, 5, 1],
    [1, 2, 6],
    [3, 6, 2],
    [3, 7, 6],
    [4, 3, 0],
    [4, 7, 3],
    [7, 4, 5],
    [7, 5, 6],
];

/// An indexed triangle mesh.
///
/// A `Mesh` stores its vertex positions, its triangles as triples of vertex indices, and one
/// normal per vertex. It may also carry texture coordinates, indexed by a separate set of
/// texture triangles: the two index spaces are independent since texture seams may split a
/// single geometric vertex into several texture coordinates.
///
/// Every index of every triangle is checked against the vertex buffer when the mesh is built.
/// After construction a mesh is only modified through [`Mesh::append`] and [`Mesh::rescale`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point<Real>>,
    triangles: Vec<IndexTriple>,
    normals: Vec<Vector<Real>>,
    tex_coords: Vec<TexCoord>,
    tex_triangles: Vec<IndexTriple>,
}

impl Mesh {
    /// Creates a new mesh from its vertices and triangles, and computes its normals.
    ///
    /// Fails if any triangle references a vertex that does not exist.
    pub fn new(vertices: Vec<Point<Real>>, triangles: Vec<IndexTriple>) -> Result<Self, MeshError> {
        Self::with_tex_coords(vertices, triangles, Vec::new(), Vec::new())
    }

    /// Creates a new textured mesh, and computes its normals.
    ///
    /// `tex_triangles` indexes `tex_coords` and may be shorter than `triangles`, for example
    /// when only some faces of the source file had texture indices.
    pub fn with_tex_coords(
        vertices: Vec<Point<Real>>,
        triangles: Vec<IndexTriple>,
        tex_coords: Vec<TexCoord>,
        tex_triangles: Vec<IndexTriple>,
    ) -> Result<Self, MeshError> {
        let mut result = Mesh {
            vertices,
            triangles,
            normals: Vec::new(),
            tex_coords,
            tex_triangles,
        };

        result.validate()?;
        result.accumulate_normals();
        Ok(result)
    }

    /// Creates a mesh without any vertex or triangle.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The cube `[0, 1]^3`, made of 8 vertices and 12 triangles.
    pub fn unit_cube() -> Self {
        let mut result = Mesh {
            vertices: UNIT_CUBE_VERTICES
                .iter()
                .map(|pt| Point::new(pt[0], pt[1], pt[2]))
                .collect(),
            triangles: UNIT_CUBE_TRIANGLES.to_vec(),
            ..Default::default()
        };
        result.accumulate_normals();
        result
    }

    /// The axis-aligned box with corners `mins` and `maxs`, triangulated like [`Mesh::unit_cube`].
    pub fn cuboid(mins: &Point<Real>, maxs: &Point<Real>) -> Self {
        let extents = maxs - mins;
        let mut result = Self::unit_cube();

        for pt in &mut result.vertices {
            *pt = mins + pt.coords.component_mul(&extents);
        }

        result
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn triangles(&self) -> &[IndexTriple] {
        &self.triangles
    }

    /// The per-vertex normals of this mesh.
    #[inline]
    pub fn normals(&self) -> &[Vector<Real>] {
        &self.normals
    }

    /// The texture coordinates of this mesh.
    #[inline]
    pub fn tex_coords(&self) -> &[TexCoord] {
        &self.tex_coords
    }

    /// The texture triangles of this mesh, indexing [`Mesh::tex_coords`].
    #[inline]
    pub fn tex_triangles(&self) -> &[IndexTriple] {
        &self.tex_triangles
    }

    /// Does this mesh carry texture coordinates?
    #[inline]
    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    /// The `i`-th triangle of this mesh, by value.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not a valid triangle index.
    #[inline]
    pub fn triangle(&self, i: usize) -> Triangle {
        let idx = self.triangles[i];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// All the triangles of this mesh, by value.
    pub fn triangles_by_value(&self) -> Vec<Triangle> {
        (0..self.triangles.len()).map(|i| self.triangle(i)).collect()
    }

    /// Computes the axis-aligned bounding box of this mesh.
    ///
    /// Fails with [`MeshError::EmptyMesh`] if the mesh has no vertex.
    pub fn bounding_box(&self) -> Result<Aabb, MeshError> {
        local_point_cloud_aabb(self.vertices.iter().copied()).ok_or(MeshError::EmptyMesh)
    }

    /// Checks that every triangle (and texture triangle) references existing vertices (and
    /// texture coordinates).
    pub fn validate(&self) -> Result<(), MeshError> {
        check_indices(&self.triangles, self.vertices.len()).map_err(
            |(triangle, corner, index)| MeshError::IndexOutOfBounds {
                triangle,
                corner,
                index,
                num_vertices: self.vertices.len(),
            },
        )?;
        check_indices(&self.tex_triangles, self.tex_coords.len()).map_err(
            |(triangle, corner, index)| MeshError::TexIndexOutOfBounds {
                triangle,
                corner,
                index,
                num_tex_coords: self.tex_coords.len(),
            },
        )
    }

    /// Recomputes the per-vertex normals from the current vertices and triangles.
    ///
    /// The normal of a face is the normalized cross product `(v1 - v0) × (v2 - v0)`; the normal
    /// of a vertex is the normalized sum of the normals of its incident faces. A vertex without
    /// any well-formed incident face keeps a zero normal: this is logged but not an error.
    ///
    /// Fails without modifying the mesh if a triangle references a vertex that does not exist.
    pub fn compute_normals(&mut self) -> Result<(), MeshError> {
        self.validate()?;
        self.accumulate_normals();
        Ok(())
    }

    fn accumulate_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.vertices.len(), Vector::zeros());

        for idx in &self.triangles {
            let tri = Triangle::from(idx.map(|vid| self.vertices[vid as usize]));
            let face_normal = utils::normalized_or_keep(tri.scaled_normal());

            for vid in idx {
                self.normals[*vid as usize] += face_normal;
            }
        }

        let mut num_degenerate = 0;

        for normal in &mut self.normals {
            if utils::normalize_or_keep(normal) <= DEFAULT_EPSILON {
                num_degenerate += 1;
            }
        }

        if num_degenerate > 0 {
            log::warn!(
                "{} of {} vertices have no well-formed incident triangle, their normal is left to zero.",
                num_degenerate,
                self.vertices.len()
            );
        }
    }

    /// Translates this mesh to the non-negative octant and scales it uniformly so that its
    /// largest bounding-box extent becomes `1`.
    ///
    /// The scale factor is the smallest of the reciprocals of the three bounding-box extents,
    /// so the aspect ratio is preserved. Axes with a zero extent are ignored; a mesh reduced to
    /// a single point is only translated.
    ///
    /// This must be called once per loaded mesh: applying it again is a no-op up to
    /// floating-point errors. Normals are invariant under this transformation and are not
    /// recomputed.
    pub fn rescale(&mut self) -> Result<(), MeshError> {
        let aabb = self.bounding_box()?;
        let extents = aabb.extents();
        let scale = extents
            .iter()
            .filter(|e| **e > 0.0)
            .map(|e| 1.0 / *e)
            .reduce(Real::min);

        let scale = scale.unwrap_or_else(|| {
            log::warn!("All the vertices of the mesh are at the same position, the mesh is only translated.");
            1.0
        });

        for pt in &mut self.vertices {
            *pt = Point::from((*pt - aabb.mins) * scale);
        }

        Ok(())
    }

    /// Appends another mesh to this one.
    ///
    /// The triangle indices of `other` are offset by the number of vertices of `self` before the
    /// call (and its texture triangles by the number of texture coordinates). Duplicate vertices
    /// are not merged and triangle windings are preserved.
    ///
    /// Fails without modifying the mesh with [`MeshError::TooManyVertices`] if the result could
    /// not be indexed with `u32`.
    pub fn append(&mut self, other: &Mesh) -> Result<(), MeshError> {
        let base_id = index_base(self.vertices.len(), other.vertices.len())?;
        let base_tex_id = index_base(self.tex_coords.len(), other.tex_coords.len())?;

        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.triangles
            .extend(other.triangles.iter().map(|idx| idx.map(|i| i + base_id)));

        self.tex_coords.extend_from_slice(&other.tex_coords);
        self.tex_triangles.extend(
            other
                .tex_triangles
                .iter()
                .map(|idx| idx.map(|i| i + base_tex_id)),
        );

        Ok(())
    }

    /// For each triangle, the list of triangles sharing one of its edges.
    pub fn triangle_adjacency(&self) -> Vec<Vec<u32>> {
        let mut edge_faces: HashMap<SortedPair<u32>, Vec<u32>> = HashMap::new();

        for (fid, idx) in self.triangles.iter().enumerate() {
            for k in 0..3 {
                let edge = SortedPair::new(idx[k], idx[(k + 1) % 3]);
                edge_faces.entry(edge).or_default().push(fid as u32);
            }
        }

        let mut result = vec![Vec::new(); self.triangles.len()];

        for faces in edge_faces.values() {
            for (i, f1) in faces.iter().enumerate() {
                for f2 in &faces[i + 1..] {
                    if f1 != f2 {
                        result[*f1 as usize].push(*f2);
                        result[*f2 as usize].push(*f1);
                    }
                }
            }
        }

        for neighbors in &mut result {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        result
    }
}

/// The offset of the indices appended after `len` elements, provided that the `len + extra`
/// resulting elements can all be addressed with `u32`.
fn index_base(len: usize, extra: usize) -> Result<u32, MeshError> {
    let max = u32::MAX as usize;
    let too_many = MeshError::TooManyVertices {
        len: len.saturating_add(extra),
        max,
    };

    if len.checked_add(extra).map_or(true, |total| total > max) {
        return Err(too_many);
    }

    u32::try_from(len).map_err(|_| too_many)
}

fn check_indices(triangles: &[IndexTriple], len: usize) -> Result<(), (usize, usize, u32)> {
    for (fid, idx) in triangles.iter().enumerate() {
        for (corner, vid) in idx.iter().enumerate() {
            if *vid as usize >= len {
                return Err((fid, corner, *vid));
            }
        }
    }

    Ok(())
}
