//! Terrain generation module.
//!
//! Samples fBm value noise over a regular grid and triangulates it into a
//! heightfield mesh.

mod builder;
mod config;

pub use builder::{
    index_count, triangle_count, vertex_count, Heightfield, TerrainBuilder, MAX_SIZE,
    PLACEHOLDER_NORMAL,
};
pub use config::{TerrainConfig, TerrainNormals};
