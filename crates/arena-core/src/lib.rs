//! Arena Core - spatial mixer and Strip group controller
//!
//! Real-time DSP for two modular-synth modules:
//! - Arena: input points on a unit square are mixed into output points by
//!   proximity, each input with its own radius of influence
//! - Strip: switches or randomizes the chain of modules next to it
//!
//! Nothing here talks to a host directly. The host feeds one [`engine::TickInput`]
//! per sample and routes the returned [`engine::TickOutput`] to its ports.

pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod state;
pub mod strip;
pub mod types;

pub use types::*;
