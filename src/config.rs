//! Shared helpers for loading generator configuration from disk.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a JSON document from `path` into `T`.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let file = File::open(path)?;
    let config = serde_json::from_reader(BufReader::new(file))?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}
