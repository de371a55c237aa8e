//! Procedural mesh generation: Menger sponges and value-noise terrain.
//!
//! Both generators emit a [`MeshBuffer`] of vec4 positions, vec4 normals and
//! `u32` triangle indices, ready for upload by an external renderer.
//! [`MeshSource`] wraps a generator with versioned snapshots so consumers
//! know when to re-upload.

pub mod config;
pub mod export;
pub mod geometry;
pub mod mesh;
pub mod noise;
pub mod pipeline;
pub mod sponge;
pub mod terrain;

pub use config::ConfigError;
pub use geometry::{CubeInstance, CubeTemplate};
pub use mesh::{MeshBuffer, MeshError, MeshSnapshot, UploadTracker};
pub use noise::{FbmConfig, NoiseField, NoiseLattice, NoiseSeed};
pub use pipeline::{GeneratorId, MeshGenerator, MeshSource};
pub use sponge::{SpongeBuilder, SpongeConfig};
pub use terrain::{Heightfield, TerrainBuilder, TerrainConfig, TerrainNormals};
