//! RAW buffer export for direct GPU upload by external tools.
//!
//! A mesh is written as three little-endian files:
//! `{base}_positions.f32`, `{base}_normals.f32` (4 floats per vertex) and
//! `{base}_indices.u32`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::mesh::{MeshBuffer, MeshError};

/// Errors that can occur during RAW export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),
}

/// Paths of the three files written by [`export_mesh_raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMeshFiles {
    pub positions: PathBuf,
    pub normals: PathBuf,
    pub indices: PathBuf,
}

impl RawMeshFiles {
    /// Returns the file paths for `base_name` inside `output_dir`.
    pub fn new(output_dir: &Path, base_name: &str) -> Self {
        Self {
            positions: output_dir.join(format!("{}_positions.f32", base_name)),
            normals: output_dir.join(format!("{}_normals.f32", base_name)),
            indices: output_dir.join(format!("{}_indices.u32", base_name)),
        }
    }
}

fn write_f32_le(path: &Path, values: &[f32]) -> Result<(), std::io::Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()
}

fn write_u32_le(path: &Path, values: &[u32]) -> Result<(), std::io::Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()
}

/// Exports the three buffers of `mesh` into `output_dir`.
///
/// # Returns
/// The paths written, or the first error encountered
pub fn export_mesh_raw(
    mesh: &MeshBuffer,
    output_dir: &Path,
    base_name: &str,
) -> Result<RawMeshFiles, RawExportError> {
    mesh.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let files = RawMeshFiles::new(output_dir, base_name);
    write_f32_le(&files.positions, mesh.positions_flat())?;
    write_f32_le(&files.normals, mesh.normals_flat())?;
    write_u32_le(&files.indices, mesh.indices())?;
    Ok(files)
}

/// Returns the expected `(positions, normals, indices)` file sizes in bytes.
pub fn expected_file_sizes(vertices: u64, indices: u64) -> (u64, u64, u64) {
    (vertices * 16, vertices * 16, indices * 4)
}
