use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use obj::ObjData;

use crate::math::{IndexTriple, Point, Real, TexCoord};
use crate::shape::Mesh;
use crate::transformation::mesh_io::MeshIoError;

/// The line terminating the OBJ files written by this crate. Lines after it are ignored.
pub const OBJ_END_MARKER: &str = "#end";

impl Mesh {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), MeshIoError> {
        let mut out = BufWriter::new(File::create(path.as_ref())?);
        self.write_obj(&mut out)?;
        out.flush()?;
        log::info!(
            "Saved {} vertices and {} triangles to {}.",
            self.vertices().len(),
            self.triangles().len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Writes this mesh in the Wavefront format.
    ///
    /// Coordinates are written with the shortest representation that reads back to the same
    /// `Real`, so [`Mesh::read_obj`] restores the exact vertex list. Texture coordinates are
    /// written (with `f v/vt` faces) only if every triangle has a texture triangle. The output
    /// ends with a `#end` line.
    pub fn write_obj<W: Write>(&self, out: &mut W) -> Result<(), MeshIoError> {
        let textured =
            self.has_tex_coords() && self.tex_triangles().len() == self.triangles().len();

        writeln!(out, "o mesh")?;

        for v in self.vertices() {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }

        if textured {
            for t in self.tex_coords() {
                writeln!(out, "vt {} {}", t.x, t.y)?;
            }
        }

        writeln!(out, "g default")?;

        for (fid, tri) in self.triangles().iter().enumerate() {
            if textured {
                let tex = self.tex_triangles()[fid];
                writeln!(
                    out,
                    "f {}/{} {}/{} {}/{}",
                    tri[0] + 1,
                    tex[0] + 1,
                    tri[1] + 1,
                    tex[1] + 1,
                    tri[2] + 1,
                    tex[2] + 1
                )?;
            } else {
                writeln!(out, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
            }
        }

        writeln!(out, "{}", OBJ_END_MARKER)?;
        Ok(())
    }

    /// Loads a mesh from a Wavefront (`.obj`) file.
    pub fn from_obj_file(path: impl AsRef<Path>) -> Result<Mesh, MeshIoError> {
        Self::read_obj(std::io::BufReader::new(File::open(path)?))
    }

    /// Reads a mesh in the Wavefront format.
    ///
    /// Faces with more than three corners are triangulated as a fan around their first corner.
    /// Texture triangles are only created for faces where every corner has a texture index.
    /// Reading stops at a `#end` line.
    pub fn read_obj<R: BufRead>(mut input: R) -> Result<Mesh, MeshIoError> {
        let mut text = String::new();
        let _ = input.read_to_string(&mut text)?;

        let mut body = String::with_capacity(text.len());
        for line in text
            .lines()
            .take_while(|line| line.trim() != OBJ_END_MARKER)
        {
            body.push_str(line);
            body.push('\n');
        }

        // The parser stores coordinates as `f32`, so they are read again at full precision.
        let data = ObjData::load_buf(body.as_bytes())?;

        let vertices: Vec<_> = parse_coordinates::<3>(&body, "v")?
            .into_iter()
            .map(|[x, y, z]| Point::new(x, y, z))
            .collect();
        let tex_coords: Vec<_> = parse_coordinates::<2>(&body, "vt")?
            .into_iter()
            .map(|[s, t]| TexCoord::new(s, t))
            .collect();

        if vertices.len() != data.position.len() || tex_coords.len() != data.texture.len() {
            return Err(MeshIoError::InvalidContent(
                "inconsistent number of OBJ vertex or texture coordinates".to_string(),
            ));
        }

        let mut triangles: Vec<IndexTriple> = Vec::new();
        let mut tex_triangles: Vec<IndexTriple> = Vec::new();

        for poly in data
            .objects
            .iter()
            .flat_map(|o| o.groups.iter())
            .flat_map(|g| g.polys.iter())
        {
            let corners = &poly.0;

            if corners.len() < 3 {
                log::warn!("Skipping an OBJ face with {} corner(s).", corners.len());
                continue;
            }

            for k in 1..corners.len() - 1 {
                let fan = [&corners[0], &corners[k], &corners[k + 1]];
                triangles.push(fan.map(|corner| corner.0 as u32));

                if let [Some(a), Some(b), Some(c)] = fan.map(|corner| corner.1) {
                    tex_triangles.push([a as u32, b as u32, c as u32]);
                }
            }
        }

        Ok(Mesh::with_tex_coords(
            vertices,
            triangles,
            tex_coords,
            tex_triangles,
        )?)
    }
}

/// Parses the first `N` coordinates of every line starting with the `keyword` statement.
fn parse_coordinates<const N: usize>(
    body: &str,
    keyword: &str,
) -> Result<Vec<[Real; N]>, MeshIoError> {
    let mut result = Vec::new();

    for (lid, line) in body.lines().enumerate() {
        let mut words = line.split_whitespace();

        if words.next() != Some(keyword) {
            continue;
        }

        let mut coords = [0.0; N];
        for coord in &mut coords {
            *coord = words
                .next()
                .and_then(|word| word.parse::<Real>().ok())
                .ok_or_else(|| {
                    MeshIoError::InvalidContent(format!(
                        "line {}: expected {N} coordinates after `{keyword}`",
                        lid + 1
                    ))
                })?;
        }
        result.push(coords);
    }

    Ok(result)
}

#[cfg(test)]
mod test {
    use crate::math::{Point, TexCoord};
    use crate::shape::Mesh;

    fn write(mesh: &Mesh) -> String {
        let mut bytes = Vec::new();
        mesh.write_obj(&mut bytes).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn obj_output_without_texture() {
        let text = write(&Mesh::unit_cube());
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 12);
        assert!(!text.lines().any(|l| l.starts_with("vt")));
        assert_eq!(text.lines().last(), Some("#end"));
    }

    #[test]
    fn obj_round_trip() {
        let cube = Mesh::cuboid(&Point::new(-1.0, 0.5, 2.0), &Point::new(3.0, 0.75, 2.5));
        let text = write(&cube);
        let loaded = Mesh::read_obj(text.as_bytes()).unwrap();
        assert_eq!(loaded.vertices(), cube.vertices());
        assert_eq!(loaded.triangles(), cube.triangles());
        assert!(!loaded.has_tex_coords());
    }

    #[test]
    fn obj_round_trip_keeps_full_precision() {
        let vertices = vec![
            Point::new(0.1, 0.2, 0.3),
            Point::new(1.0, 1.0 / 3.0, 0.0),
            Point::new(0.0, 1.0, 0.7),
        ];
        let mut mesh = Mesh::new(vertices, vec![[0, 1, 2]]).unwrap();
        mesh.rescale().unwrap();

        let loaded = Mesh::read_obj(write(&mesh).as_bytes()).unwrap();
        assert_eq!(loaded.vertices(), mesh.vertices());
        assert_eq!(loaded.triangles(), mesh.triangles());
    }

    #[test]
    fn obj_rejects_truncated_vertex() {
        let text = "v 0 0 0\nv 1 0\nv 0 1 0\nf 1 2 3\n";
        assert!(Mesh::read_obj(text.as_bytes()).is_err());
    }

    #[test]
    fn obj_textured_round_trip() {
        let vertices = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        let tex = vec![
            TexCoord::new(0.0, 0.0),
            TexCoord::new(1.0, 0.0),
            TexCoord::new(0.1, 2.0 / 3.0),
        ];
        let mesh = Mesh::with_tex_coords(vertices, vec![[0, 1, 2]], tex, vec![[2, 1, 0]]).unwrap();

        let text = write(&mesh);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 3);

        let loaded = Mesh::read_obj(text.as_bytes()).unwrap();
        assert_eq!(loaded.tex_coords(), mesh.tex_coords());
        assert_eq!(loaded.tex_triangles(), mesh.tex_triangles());
    }

    #[test]
    fn obj_quads_are_fan_triangulated() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 2 0\nf 1 2 3 4 5\n";
        let mesh = Mesh::read_obj(text.as_bytes()).unwrap();
        assert_eq!(mesh.triangles(), &[[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn obj_reading_stops_at_end_marker() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n#end\nv 5 5 5\nf 1 2 4\n";
        let mesh = Mesh::read_obj(text.as_bytes()).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.triangles().len(), 1);
    }
}
