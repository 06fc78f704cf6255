//! Spatial mix engine - points, falloff, command queue and UI atomics
//!
//! This module contains the real-time core of the Arena module:
//! - SpatialMixEngine: per-sample proximity mixing of input points into output points
//! - Falloff: the distance -> contribution weight curve
//! - Commands: lock-free UI -> audio edits applied at tick boundaries
//! - ArenaProcessor: audio-thread owner of an engine, publishes state to ArenaAtomics

mod arena;
mod atomics;
mod command;
mod falloff;
mod frame;
mod processor;

pub use arena::*;
pub use atomics::*;
pub use command::*;
pub use falloff::*;
pub use frame::*;
pub use processor::*;
