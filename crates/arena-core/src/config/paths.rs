//! Standard locations for Arena configuration files

use std::path::PathBuf;

/// File name of the engine configuration
pub const CONFIG_FILE_NAME: &str = "arena.yaml";

/// Get the default configuration directory
///
/// Returns: `<platform config dir>/arena` (e.g. `~/.config/arena` on Linux),
/// or `./arena` when the platform has no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arena")
}

/// Get the default engine config file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}
