//! Configuration for Menger sponge generation.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{load_json, ConfigError};

/// Configuration parameters for the sponge builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpongeConfig {
    /// Minimum corner of the root cube.
    pub start: Vec3,
    /// Edge length of the root cube.
    pub width: f32,
    /// Build the 20 top-level subtrees on the rayon pool.
    pub parallel: bool,
}

impl Default for SpongeConfig {
    fn default() -> Self {
        Self {
            start: Vec3::splat(-0.5),
            width: 1.0,
            parallel: true,
        }
    }
}

impl SpongeConfig {
    /// Creates a single-threaded configuration around the unit cube.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }
}
