//! Small per-sample control utilities
//!
//! - [`SchmittTrigger`]: rising-edge detection with hysteresis for buttons
//!   and trigger inputs
//! - [`ClockDivider`]: runs low-rate work (lights, UI publishing) every N ticks

/// Rising-edge detector with hysteresis
///
/// Goes high when the input reaches `1.0` and only re-arms once the input
/// falls back to `0.0` or below, so a noisy gate produces a single edge.
#[derive(Debug, Clone, Default)]
pub struct SchmittTrigger {
    high: bool,
}

impl SchmittTrigger {
    /// Input level at or above which the trigger fires
    pub const HIGH_THRESHOLD: f32 = 1.0;
    /// Input level at or below which the trigger re-arms
    pub const LOW_THRESHOLD: f32 = 0.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample, returns `true` on a rising edge
    #[inline]
    pub fn process(&mut self, input: f32) -> bool {
        if self.high {
            if input <= Self::LOW_THRESHOLD {
                self.high = false;
            }
            false
        } else if input >= Self::HIGH_THRESHOLD {
            self.high = true;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.high = false;
    }
}

/// Fires once every `division` calls to [`ClockDivider::process`]
#[derive(Debug, Clone)]
pub struct ClockDivider {
    division: u32,
    count: u32,
}

impl ClockDivider {
    /// Create a divider. A division of 0 is treated as 1 (fire every tick).
    pub fn new(division: u32) -> Self {
        Self {
            division: division.max(1),
            count: 0,
        }
    }

    pub fn division(&self) -> u32 {
        self.division
    }

    /// Advance one tick, returns `true` on every `division`-th tick
    #[inline]
    pub fn process(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.division {
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}
