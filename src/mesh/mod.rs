//! Mesh buffer types shared by every generator.
//!
//! A mesh is three flat, parallel sequences (positions, normals, indices)
//! ready to be handed to a renderer for upload.

mod buffer;
pub mod snapshot;

pub use buffer::{MeshBuffer, MeshError};
pub use snapshot::{MeshSnapshot, UploadTracker};
