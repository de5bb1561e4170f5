//! Loading meshes from files, with the format chosen from the file extension.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::shape::{Mesh, MeshError};

/// Errors raised while loading or saving a mesh file.
#[derive(thiserror::Error, Debug)]
pub enum MeshIoError {
    /// The file extension does not match any supported format.
    #[error("unsupported mesh format: {0:?}")]
    UnsupportedFormat(String),
    /// An I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The file content does not follow the expected format.
    #[error("invalid mesh file content: {0}")]
    InvalidContent(String),
    /// The OBJ parser or writer failed.
    #[cfg(feature = "wavefront")]
    #[error(transparent)]
    Obj(#[from] obj::ObjError),
    /// The file describes an inconsistent mesh.
    #[error(transparent)]
    Geometry(#[from] MeshError),
}

/// The mesh file formats that can be loaded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshFormat {
    /// Wavefront OBJ.
    Obj,
    /// Stanford PLY, ASCII or binary.
    Ply,
}

impl MeshFormat {
    /// Guesses the format of a file from its extension, ignoring case.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MeshIoError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("obj") => Ok(MeshFormat::Obj),
            Some("ply") => Ok(MeshFormat::Ply),
            _ => Err(MeshIoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Loads the mesh stored at `path`.
///
/// If `normalize` is `true`, the mesh is rescaled to fit the unit box (see [`Mesh::rescale`]).
/// Normals are always recomputed from the loaded geometry.
pub fn load_mesh(path: impl AsRef<Path>, normalize: bool) -> Result<Mesh, MeshIoError> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)?;
    let input = BufReader::new(File::open(path)?);

    let mut mesh = match format {
        #[cfg(feature = "wavefront")]
        MeshFormat::Obj => Mesh::read_obj(input)?,
        #[cfg(not(feature = "wavefront"))]
        MeshFormat::Obj => {
            return Err(MeshIoError::UnsupportedFormat(format!(
                "{} (the `wavefront` feature is disabled)",
                path.display()
            )))
        }
        MeshFormat::Ply => Mesh::read_ply(input)?,
    };

    if normalize {
        mesh.rescale()?;
    }

    mesh.compute_normals()?;

    log::info!(
        "Loaded {} vertices and {} triangles from {}.",
        mesh.vertices().len(),
        mesh.triangles().len(),
        path.display()
    );

    Ok(mesh)
}
