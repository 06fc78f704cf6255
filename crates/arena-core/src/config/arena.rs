//! Engine tunables
//!
//! None of these change the signal math; they control defaults, pointer
//! feel and how often state is handed to the UI thread.

use serde::{Deserialize, Serialize};

use crate::engine::COMMAND_QUEUE_CAPACITY;
use crate::types::DEFAULT_RADIUS;

/// Arena / Strip configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Radius given to every input point on construction and reset.
    /// Clamped to `[0, 1]` when applied.
    /// Default: 0.5
    pub default_radius: f32,

    /// Scale applied to pointer drag deltas (normalized to the arena area)
    /// before they move a point. Lower values give finer control.
    /// Default: 0.3
    pub drag_sensitivity: f32,

    /// Ticks between publications of engine state to the UI atomics.
    /// Default: 512 (~94 Hz at 48 kHz)
    pub publish_division: u32,

    /// Capacity of the UI -> audio command queue.
    /// Default: 256
    pub command_queue_capacity: usize,

    /// Ticks between Strip light updates.
    /// Default: 1024
    pub strip_light_division: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            default_radius: DEFAULT_RADIUS,
            drag_sensitivity: 0.3,
            publish_division: 512,
            command_queue_capacity: COMMAND_QUEUE_CAPACITY,
            strip_light_division: 1024,
        }
    }
}

impl ArenaConfig {
    /// Default radius, clamped to the valid range
    pub fn clamped_default_radius(&self) -> f32 {
        if self.default_radius.is_nan() {
            DEFAULT_RADIUS
        } else {
            self.default_radius.clamp(0.0, 1.0)
        }
    }
}
