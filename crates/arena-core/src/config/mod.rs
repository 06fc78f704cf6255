//! Configuration for the Arena core
//!
//! - [`ArenaConfig`]: tunables for the spatial engine, command queue and Strip
//! - YAML loading/saving for any serde config type
//! - Standard config file location
//!
//! # Usage
//!
//! ```ignore
//! use arena_core::config::{default_config_path, load_config, ArenaConfig};
//!
//! let config: ArenaConfig = load_config(&default_config_path());
//! let engine = Arena::with_config(&config);
//! ```

mod arena;
mod io;
mod paths;

pub use arena::ArenaConfig;
pub use io::{load_config, save_config};
pub use paths::{default_config_dir, default_config_path, CONFIG_FILE_NAME};
