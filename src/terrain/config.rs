//! Configuration for heightfield terrain generation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{load_json, ConfigError};
use crate::noise::{FbmConfig, NoiseSeed};

/// How per-vertex terrain normals are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainNormals {
    /// Central differences of the height function: `normalize(-∂h/∂x, 1, -∂h/∂z)`.
    Slope,
    /// A constant `+X` direction for every vertex, ignoring the surface.
    Placeholder,
}

impl Default for TerrainNormals {
    fn default() -> Self {
        TerrainNormals::Slope
    }
}

/// Configuration parameters for the terrain builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Vertical offset added to every height.
    pub base_height: f32,
    /// Fractal noise parameters.
    pub fbm: FbmConfig,
    /// Lattice seed; `Random` draws a new lattice on every build.
    pub seed: NoiseSeed,
    /// Normal generation mode.
    pub normals: TerrainNormals,
    /// Sample heights on the rayon pool.
    pub parallel: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            base_height: -3.0,
            fbm: FbmConfig::default(),
            seed: NoiseSeed::Random,
            normals: TerrainNormals::Slope,
            parallel: true,
        }
    }
}

impl TerrainConfig {
    /// Creates a reproducible configuration with the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: NoiseSeed::Fixed(seed),
            ..Default::default()
        }
    }

    /// Reseeds on every build and emits constant placeholder normals.
    pub fn reference() -> Self {
        Self {
            seed: NoiseSeed::Random,
            normals: TerrainNormals::Placeholder,
            ..Default::default()
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }
}
