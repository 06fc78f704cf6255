//! Per-tick input and output frames
//!
//! Frames are fixed-size arrays so a tick never allocates. The host fills a
//! [`TickInput`] from its port state each sample and reads the returned
//! [`TickOutput`] back into its output ports.

use crate::types::PositionOverride;

/// Everything the engine consumes for one sample frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput<const IN: usize, const MIX: usize> {
    /// Input point signals. `None` = nothing patched into the input,
    /// so the point never contributes.
    pub samples: [Option<f32>; IN],
    /// Position control voltages per input point
    pub input_overrides: [PositionOverride; IN],
    /// Position control voltages per output point
    pub output_overrides: [PositionOverride; MIX],
    /// Select button / trigger value per output point
    pub select_triggers: [f32; MIX],
}

impl<const IN: usize, const MIX: usize> TickInput<IN, MIX> {
    /// A frame with nothing patched
    pub fn new() -> Self {
        Self {
            samples: [None; IN],
            input_overrides: [PositionOverride::NONE; IN],
            output_overrides: [PositionOverride::NONE; MIX],
            select_triggers: [0.0; MIX],
        }
    }

    /// Set (or patch) the signal of one input point. Out-of-range is ignored.
    pub fn with_sample(mut self, input: usize, voltage: f32) -> Self {
        if let Some(slot) = self.samples.get_mut(input) {
            *slot = Some(voltage);
        }
        self
    }
}

impl<const IN: usize, const MIX: usize> Default for TickInput<IN, MIX> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the engine produces for one sample frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput<const IN: usize, const MIX: usize> {
    /// Averaged mix per output point, 0-10V
    pub mix: [f32; MIX],
    /// Per-input signal as perceived by all nearby output points, 0-10V
    pub pass_through: [f32; IN],
}

impl<const IN: usize, const MIX: usize> TickOutput<IN, MIX> {
    pub fn silence() -> Self {
        Self {
            mix: [0.0; MIX],
            pass_through: [0.0; IN],
        }
    }
}

impl<const IN: usize, const MIX: usize> Default for TickOutput<IN, MIX> {
    fn default() -> Self {
        Self::silence()
    }
}
