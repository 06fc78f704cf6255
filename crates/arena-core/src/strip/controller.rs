//! Strip per-sample control logic

use crate::config::ArenaConfig;
use crate::dsp::{ClockDivider, SchmittTrigger};
use crate::state::StripState;

use super::{OnMode, Side, StripMode};

/// Host-side view of the module chain next to a Strip
///
/// The host walks its expander chain on the requested side and applies the
/// operation to every module until the chain ends.
pub trait StripGroup {
    /// Bypass (`true`) or enable (`false`) every module on `side`
    fn set_bypassed(&mut self, side: Side, bypassed: bool);

    /// Randomize every module on `side`
    fn randomize(&mut self, side: Side);
}

/// Control values for one sample
///
/// Each field is the button value plus the input voltage, as the host sums them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StripInputs {
    /// Mode button
    pub mode: f32,
    /// "On" button + input
    pub on: f32,
    /// "Off" button + input
    pub off: f32,
    /// "Randomize" button + input
    pub randomize: f32,
}

/// Left/right indicator lights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripLights {
    pub left: bool,
    pub right: bool,
}

/// Strip module state and trigger handling
#[derive(Debug, Clone)]
pub struct StripController {
    mode: StripMode,
    on_mode: OnMode,
    /// `true` while the group is bypassed
    bypassed: bool,
    mode_trigger: SchmittTrigger,
    on_trigger: SchmittTrigger,
    off_trigger: SchmittTrigger,
    randomize_trigger: SchmittTrigger,
    light_divider: ClockDivider,
    lights: StripLights,
}

impl StripController {
    pub fn new() -> Self {
        Self::with_config(&ArenaConfig::default())
    }

    pub fn with_config(config: &ArenaConfig) -> Self {
        Self {
            mode: StripMode::default(),
            on_mode: OnMode::default(),
            bypassed: false,
            mode_trigger: SchmittTrigger::new(),
            on_trigger: SchmittTrigger::new(),
            off_trigger: SchmittTrigger::new(),
            randomize_trigger: SchmittTrigger::new(),
            light_divider: ClockDivider::new(config.strip_light_division),
            lights: StripLights::default(),
        }
    }

    pub fn mode(&self) -> StripMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: StripMode) {
        self.mode = mode;
    }

    pub fn on_mode(&self) -> OnMode {
        self.on_mode
    }

    pub fn set_on_mode(&mut self, on_mode: OnMode) {
        self.on_mode = on_mode;
    }

    /// Whether the group was last switched off
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Light state as of the last light update
    pub fn lights(&self) -> StripLights {
        self.lights
    }

    /// Process one sample of control input
    pub fn process<G: StripGroup + ?Sized>(&mut self, inputs: &StripInputs, group: &mut G) {
        if self.mode_trigger.process(inputs.mode) {
            self.mode = self.mode.next();
            // Treat the new group as switched off so the next "on" enables it
            self.bypassed = true;
        }

        if self.off_trigger.process(inputs.off) {
            self.set_group_bypassed(true, group);
        }

        match self.on_mode {
            OnMode::Default => {
                if self.on_trigger.process(inputs.on) {
                    self.set_group_bypassed(false, group);
                }
            }
            OnMode::Toggle => {
                if self.on_trigger.process(inputs.on) {
                    self.set_group_bypassed(!self.bypassed, group);
                }
            }
            OnMode::HighLow => {
                self.set_group_bypassed(inputs.on < 1.0, group);
            }
        }

        if self.randomize_trigger.process(inputs.randomize) {
            for &side in self.mode.sides() {
                group.randomize(side);
            }
        }

        if self.light_divider.process() {
            self.lights = StripLights {
                left: self.mode.includes(Side::Left),
                right: self.mode.includes(Side::Right),
            };
        }
    }

    /// Switch the whole group; no-op when it is already in that state
    fn set_group_bypassed<G: StripGroup + ?Sized>(&mut self, bypassed: bool, group: &mut G) {
        if self.bypassed == bypassed {
            return;
        }
        self.bypassed = bypassed;
        for &side in self.mode.sides() {
            group.set_bypassed(side, bypassed);
        }
    }

    /// Snapshot the persisted fields
    pub fn to_state(&self) -> StripState {
        StripState {
            mode: self.mode,
            on_mode: self.on_mode,
        }
    }

    pub fn restore(&mut self, state: &StripState) {
        self.mode = state.mode;
        self.on_mode = state.on_mode;
    }

    /// Module reset: both sides, default on-mode, group considered enabled
    ///
    /// The host's modules are not touched.
    pub fn reset(&mut self) {
        self.mode = StripMode::default();
        self.on_mode = OnMode::default();
        self.bypassed = false;
        for trigger in [
            &mut self.mode_trigger,
            &mut self.on_trigger,
            &mut self.off_trigger,
            &mut self.randomize_trigger,
        ] {
            trigger.reset();
        }
        self.light_divider.reset();
        self.lights = StripLights::default();
    }
}

impl Default for StripController {
    fn default() -> Self {
        Self::new()
    }
}
