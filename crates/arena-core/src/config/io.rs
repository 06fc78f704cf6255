//! YAML configuration I/O
//!
//! Loading never fails: a missing, unreadable or malformed file yields the
//! type's default and a log line. Saving reports errors with context.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

/// Load a configuration from a YAML file, falling back to `T::default()`
///
/// Fields missing from the file take their defaults when `T` is declared
/// with `#[serde(default)]`.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("load_config: {:?} not found, using defaults", path);
            return T::default();
        }
        Err(e) => {
            log::warn!("load_config: Failed to read {:?}: {}, using defaults", path, e);
            return T::default();
        }
    };

    match serde_yaml::from_str::<T>(&contents) {
        Ok(config) => {
            log::info!("load_config: Loaded {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: Invalid config in {:?}: {}, using defaults", path, e);
            T::default()
        }
    }
}

/// Save a configuration as YAML, creating parent directories as needed
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Saved {:?}", path);
    Ok(())
}
