//! Wavefront OBJ export for generated meshes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::mesh::{MeshBuffer, MeshError};

/// Errors that can occur during OBJ export.
#[derive(Error, Debug)]
pub enum ObjExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),
}

/// Writes `mesh` to `writer` as OBJ text.
///
/// Each vertex gets a `v` and a `vn` line; faces reference both with
/// 1-based indices (`f a//a b//b c//c`).
pub fn write_mesh_obj<W: Write>(mesh: &MeshBuffer, writer: &mut W) -> Result<(), ObjExportError> {
    mesh.validate()?;

    writeln!(writer, "# spongegen mesh")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    for p in mesh.positions() {
        writeln!(writer, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for n in mesh.normals() {
        writeln!(writer, "vn {} {} {}", n[0], n[1], n[2])?;
    }
    for tri in mesh.indices().chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    Ok(())
}

/// Exports `mesh` as an OBJ file at `path`.
pub fn export_mesh_obj(mesh: &MeshBuffer, path: &Path) -> Result<(), ObjExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_mesh_obj(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}
