//! Export module for saving generated meshes and heightfields to disk.
//!
//! Supports Wavefront OBJ for inspection in modelling tools, raw
//! little-endian buffers for direct GPU upload, and 16-bit PNG heightmaps.

mod obj;
mod png;
mod raw;

pub use obj::{export_mesh_obj, write_mesh_obj, ObjExportError};
pub use png::{export_heightfield_png, PngExportError, PngExportOptions};
pub use raw::{export_mesh_raw, expected_file_sizes, RawExportError, RawMeshFiles};
