//! Loading meshes from Stanford PLY files.
//!
//! Vertices must have `x`, `y` and `z` properties. A vertex `s` property marks the presence of
//! texture coordinates `(s, t)`; the `t` coordinate is flipped to `1 - t` on load. Faces must
//! be triangles, listed in a `vertex_indices` (or `vertex_index`) property.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::math::{IndexTriple, Point, Real, TexCoord};
use crate::shape::Mesh;
use crate::transformation::mesh_io::MeshIoError;

impl Mesh {
    /// Loads a mesh from a PLY file.
    pub fn from_ply_file(path: impl AsRef<Path>) -> Result<Mesh, MeshIoError> {
        Self::read_ply(BufReader::new(File::open(path)?))
    }

    /// Reads a mesh in the PLY format.
    ///
    /// Faces with a number of corners other than three are rejected with
    /// [`MeshIoError::InvalidContent`].
    pub fn read_ply<R: BufRead>(mut input: R) -> Result<Mesh, MeshIoError> {
        let parser = Parser::<DefaultElement>::new();
        let header = parser
            .read_header(&mut input)
            .map_err(|e| MeshIoError::InvalidContent(format!("failed to parse PLY header: {e}")))?;
        let payload = parser
            .read_payload(&mut input, &header)
            .map_err(|e| MeshIoError::InvalidContent(format!("failed to read PLY payload: {e}")))?;

        let has_tex = header
            .elements
            .get("vertex")
            .is_some_and(|vertex| vertex.properties.contains_key("s"));

        let mut vertices = Vec::new();
        let mut tex_coords = Vec::new();

        for (vid, element) in payload.get("vertex").into_iter().flatten().enumerate() {
            let x = float_property(element, "x", vid)?;
            let y = float_property(element, "y", vid)?;
            let z = float_property(element, "z", vid)?;
            vertices.push(Point::new(x, y, z));

            if has_tex {
                let s = float_property(element, "s", vid)?;
                let t = float_property(element, "t", vid)?;
                tex_coords.push(TexCoord::new(s, 1.0 - t));
            }
        }

        let mut triangles: Vec<IndexTriple> = Vec::new();

        for (fid, element) in payload.get("face").into_iter().flatten().enumerate() {
            let indices = index_list(element).ok_or_else(|| {
                MeshIoError::InvalidContent(format!("face {fid} has no valid vertex index list"))
            })?;

            match indices[..] {
                [a, b, c] => triangles.push([a, b, c]),
                _ => {
                    return Err(MeshIoError::InvalidContent(format!(
                        "face {fid} has {} corners, only triangles are supported",
                        indices.len()
                    )))
                }
            }
        }

        // Texture coordinates are per-vertex, so the texture triangles are the triangles.
        let tex_triangles = if has_tex {
            triangles.clone()
        } else {
            Vec::new()
        };

        Ok(Mesh::with_tex_coords(
            vertices,
            triangles,
            tex_coords,
            tex_triangles,
        )?)
    }
}

fn float_property(element: &DefaultElement, key: &str, vid: usize) -> Result<Real, MeshIoError> {
    match element.get(key) {
        Some(Property::Float(v)) => Ok(*v as Real),
        Some(Property::Double(v)) => Ok(*v),
        _ => Err(MeshIoError::InvalidContent(format!(
            "vertex {vid} has no floating-point property {key:?}"
        ))),
    }
}

fn index_list(element: &DefaultElement) -> Option<Vec<u32>> {
    fn convert<T: Copy + TryInto<u32>>(ids: &[T]) -> Option<Vec<u32>> {
        ids.iter().map(|id| (*id).try_into().ok()).collect()
    }

    for key in ["vertex_indices", "vertex_index"] {
        if let Some(prop) = element.get(key) {
            return match prop {
                Property::ListChar(v) => convert(v),
                Property::ListUChar(v) => convert(v),
                Property::ListShort(v) => convert(v),
                Property::ListUShort(v) => convert(v),
                Property::ListInt(v) => convert(v),
                Property::ListUInt(v) => convert(v),
                _ => None,
            };
        }
    }

    None
}
