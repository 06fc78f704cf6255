//! Spatial mix engine
//!
//! Input points (sources with a falloff radius) and output points (sinks) live
//! in the unit square. Every tick each output point mixes the inputs whose
//! radius it sits inside, weighted by [`contribution_weight`]:
//!
//! ```text
//! mix[i]  = sum(sample[j] * s(d[i][j])) / count     (0 when nothing is in range)
//! out[j]  = clamp(sum over i of sample[j] * s(d[i][j]), 0, 10)
//! ```
//!
//! The engine is owned by the audio thread. UI edits arrive as
//! [`ArenaCommand`]s applied between ticks (see [`super::ArenaProcessor`]).

use crate::config::ArenaConfig;
use crate::dsp::SchmittTrigger;
use crate::state::ArenaState;
use crate::types::{
    clamp_voltage, column_coordinate, PointKind, Position, Selection, IN_PORTS, MAX_VOLTAGE,
    MIX_PORTS,
};

use super::{contribution_weight, ArenaCommand, TickInput, TickOutput};

/// The standard 8-in / 2-out Arena
pub type Arena = SpatialMixEngine<IN_PORTS, MIX_PORTS>;
/// Input frame for the standard Arena
pub type ArenaInput = TickInput<IN_PORTS, MIX_PORTS>;
/// Output frame for the standard Arena
pub type ArenaOutput = TickOutput<IN_PORTS, MIX_PORTS>;

/// Proximity mixer over `IN` input points and `MIX` output points
///
/// Point counts are fixed by the type; indices stay valid for the lifetime
/// of the engine.
#[derive(Debug, Clone)]
pub struct SpatialMixEngine<const IN: usize, const MIX: usize> {
    /// Input point positions
    inputs: [Position; IN],
    /// Falloff radius per input point, `[0, 1]`
    radius: [f32; IN],
    /// Output point positions
    outputs: [Position; MIX],
    /// `dist[output][input]` from the most recent tick
    dist: [[f32; IN]; MIX],
    /// Highlighted point, if any
    selection: Option<Selection>,
    /// Select trigger per output point
    select_triggers: [SchmittTrigger; MIX],
    /// Radius restored on reset
    default_radius: f32,
    /// Scale applied to pointer drag deltas
    drag_sensitivity: f32,
}

impl<const IN: usize, const MIX: usize> SpatialMixEngine<IN, MIX> {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(&ArenaConfig::default())
    }

    /// Create an engine with the default layout and the configured radius
    pub fn with_config(config: &ArenaConfig) -> Self {
        let default_radius = config.clamped_default_radius();
        let drag_sensitivity = if config.drag_sensitivity.is_finite() {
            config.drag_sensitivity
        } else {
            ArenaConfig::default().drag_sensitivity
        };
        log::debug!(
            "SpatialMixEngine: {} inputs, {} outputs, default radius {}",
            IN,
            MIX,
            default_radius
        );

        let mut engine = Self {
            inputs: [Position::default(); IN],
            radius: [default_radius; IN],
            outputs: [Position::default(); MIX],
            dist: [[0.0; IN]; MIX],
            selection: None,
            select_triggers: std::array::from_fn(|_| SchmittTrigger::new()),
            default_radius,
            drag_sensitivity,
        };
        engine.reset_layout();
        engine
    }

    /// Restore the default layout and radii and clear the selection
    pub fn reset(&mut self) {
        self.reset_layout();
        self.radius = [self.default_radius; IN];
        self.selection = None;
        for trigger in &mut self.select_triggers {
            trigger.reset();
        }
    }

    /// Inputs in a column on the left, outputs in a column on the right
    fn reset_layout(&mut self) {
        for (j, p) in self.inputs.iter_mut().enumerate() {
            *p = Position::new(0.1, column_coordinate(j, IN));
        }
        for (i, p) in self.outputs.iter_mut().enumerate() {
            *p = Position::new(0.9, column_coordinate(i, MIX));
        }
        self.update_distances();
    }

    fn update_distances(&mut self) {
        for (row, out_pos) in self.dist.iter_mut().zip(self.outputs.iter()) {
            for (d, in_pos) in row.iter_mut().zip(self.inputs.iter()) {
                *d = out_pos.distance(in_pos);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Processing
    // ─────────────────────────────────────────────────────────────

    /// Process one sample frame
    ///
    /// Real-time safe: no allocation, no locks, bounded `O(IN * MIX)` work.
    pub fn tick(&mut self, input: &TickInput<IN, MIX>) -> TickOutput<IN, MIX> {
        let mut output = TickOutput::silence();

        // Patched position inputs win over the stored coordinates and stick
        for (p, ovr) in self.inputs.iter_mut().zip(input.input_overrides.iter()) {
            p.apply_override(ovr);
        }

        for i in 0..MIX {
            self.outputs[i].apply_override(&input.output_overrides[i]);
            let out_pos = self.outputs[i];

            let mut count = 0usize;
            let mut mix = 0.0f32;
            for j in 0..IN {
                let d = out_pos.distance(&self.inputs[j]);
                self.dist[i][j] = d;

                let Some(sample) = input.samples[j] else {
                    continue;
                };
                let s = contribution_weight(d, self.radius[j]);
                if s > 0.0 {
                    let v = clamp_voltage(sample) * s;
                    mix += v;
                    // Shared across outputs: accumulates over the whole tick
                    output.pass_through[j] += v;
                    count += 1;
                }
            }

            output.mix[i] = if count > 0 { mix / count as f32 } else { 0.0 };

            if self.select_triggers[i].process(input.select_triggers[i]) {
                self.set_selection(PointKind::Output, i);
            }
        }

        for v in &mut output.pass_through {
            *v = v.clamp(0.0, MAX_VOLTAGE);
        }

        output
    }

    // ─────────────────────────────────────────────────────────────
    // Distances and radii
    // ─────────────────────────────────────────────────────────────

    /// Distance between an output and an input point as of the last tick
    pub fn distance(&self, output: usize, input: usize) -> Option<f32> {
        self.dist.get(output)?.get(input).copied()
    }

    /// Full `dist[output][input]` matrix as of the last tick
    pub fn distances(&self) -> &[[f32; IN]; MIX] {
        &self.dist
    }

    /// Whether `input` currently reaches `output` (used to draw connection lines)
    pub fn is_in_range(&self, output: usize, input: usize) -> bool {
        match (self.distance(output, input), self.radius(input)) {
            (Some(d), Some(r)) => super::within_radius(d, r),
            _ => false,
        }
    }

    pub fn radius(&self, input: usize) -> Option<f32> {
        self.radius.get(input).copied()
    }

    pub fn radii(&self) -> &[f32; IN] {
        &self.radius
    }

    /// Set the falloff radius of an input point, clamped to `[0, 1]`
    ///
    /// A radius of 0 disables the point. NaN is ignored.
    pub fn set_radius(&mut self, input: usize, radius: f32) {
        if radius.is_nan() {
            return;
        }
        if let Some(r) = self.radius.get_mut(input) {
            *r = radius.clamp(0.0, 1.0);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Positions
    // ─────────────────────────────────────────────────────────────

    pub fn position(&self, kind: PointKind, index: usize) -> Option<Position> {
        match kind {
            PointKind::Input => self.inputs.get(index).copied(),
            PointKind::Output => self.outputs.get(index).copied(),
        }
    }

    fn position_mut(&mut self, kind: PointKind, index: usize) -> Option<&mut Position> {
        match kind {
            PointKind::Input => self.inputs.get_mut(index),
            PointKind::Output => self.outputs.get_mut(index),
        }
    }

    /// Move a point to an absolute position (clamped to the unit square)
    pub fn set_position(&mut self, kind: PointKind, index: usize, x: f32, y: f32) {
        if let Some(p) = self.position_mut(kind, index) {
            p.set_x(x);
            p.set_y(y);
        }
    }

    /// Apply a pointer drag
    ///
    /// `dx`/`dy` are mouse deltas normalized to the arena area; they are
    /// scaled by the drag sensitivity before moving the point.
    pub fn drag(&mut self, kind: PointKind, index: usize, dx: f32, dy: f32) {
        let k = self.drag_sensitivity;
        if let Some(p) = self.position_mut(kind, index) {
            p.offset(dx * k, dy * k);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Select a point. Out-of-range indices are ignored.
    pub fn set_selection(&mut self, kind: PointKind, index: usize) {
        let count = match kind {
            PointKind::Input => IN,
            PointKind::Output => MIX,
        };
        if index < count {
            self.selection = Some(Selection::new(kind, index));
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn is_selected(&self, kind: PointKind, index: usize) -> bool {
        self.selection == Some(Selection::new(kind, index))
    }

    // ─────────────────────────────────────────────────────────────
    // Commands and persistence
    // ─────────────────────────────────────────────────────────────

    /// Apply one queued UI edit
    pub fn apply(&mut self, command: ArenaCommand) {
        match command {
            ArenaCommand::SetPosition { kind, index, x, y } => self.set_position(kind, index, x, y),
            ArenaCommand::Drag { kind, index, dx, dy } => self.drag(kind, index, dx, dy),
            ArenaCommand::SetRadius { input, radius } => self.set_radius(input, radius),
            ArenaCommand::Select { kind, index } => self.set_selection(kind, index),
            ArenaCommand::ClearSelection => self.clear_selection(),
            ArenaCommand::Reset => self.reset(),
        }
    }

    /// Snapshot the persisted fields (radii only)
    pub fn to_state(&self) -> ArenaState {
        ArenaState {
            radius: self.radius.iter().map(|&r| Some(r)).collect(),
        }
    }

    /// Restore radii from a persisted state
    ///
    /// Missing, invalid or out-of-range entries keep the current radius;
    /// entries beyond the point count are ignored.
    /// Returns the number of radii applied.
    pub fn restore(&mut self, state: &ArenaState) -> usize {
        let mut applied = 0;
        for (r, value) in self.radius.iter_mut().zip(state.radius.iter()) {
            if let Some(v) = value.filter(|v| (0.0f32..=1.0).contains(v)) {
                *r = v;
                applied += 1;
            }
        }
        applied
    }
}

impl<const IN: usize, const MIX: usize> Default for SpatialMixEngine<IN, MIX> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PositionOverride;

    type Single = SpatialMixEngine<1, 1>;

    fn single_at(out_x: f32, out_y: f32) -> Single {
        let mut engine = Single::new();
        engine.set_position(PointKind::Input, 0, 0.5, 0.5);
        engine.set_position(PointKind::Output, 0, out_x, out_y);
        engine.set_radius(0, 0.5);
        engine
    }

    #[test]
    fn test_default_layout() {
        let engine = Arena::new();
        assert_eq!(engine.position(PointKind::Input, 0), Some(Position::new(0.1, 0.1)));
        let last = engine.position(PointKind::Input, IN_PORTS - 1).unwrap();
        assert!((last.y - 0.9).abs() < 1e-6);
        let out1 = engine.position(PointKind::Output, 1).unwrap();
        assert!((out1.x - 0.9).abs() < 1e-6 && (out1.y - 0.9).abs() < 1e-6);
        assert!(engine.radii().iter().all(|&r| r == 0.5));
        assert_eq!(engine.selection(), None);
    }

    #[test]
    fn test_colocated_full_mix() {
        let mut engine = single_at(0.5, 0.5);
        let out = engine.tick(&TickInput::new().with_sample(0, 10.0));
        assert_eq!(out.mix[0], 10.0);
        assert_eq!(out.pass_through[0], 10.0);
        assert_eq!(engine.distance(0, 0), Some(0.0));
    }

    #[test]
    fn test_outside_radius_is_silent() {
        // Output 0.6 away from the input, radius 0.5
        let mut engine = single_at(0.5, 1.1);
        engine.set_position(PointKind::Output, 0, 0.5, 0.0);
        engine.set_position(PointKind::Input, 0, 0.5, 0.6);
        let out = engine.tick(&TickInput::new().with_sample(0, 10.0));
        assert_eq!(out.mix[0], 0.0);
        assert_eq!(out.pass_through[0], 0.0);
        assert!((engine.distance(0, 0).unwrap() - 0.6).abs() < 1e-6);
        assert!(!engine.is_in_range(0, 0));
    }

    #[test]
    fn test_unpatched_input_never_contributes() {
        let mut engine = single_at(0.5, 0.5);
        let out = engine.tick(&TickInput::new());
        assert_eq!(out.mix[0], 0.0);
        // Distances are still tracked for rendering
        assert_eq!(engine.distance(0, 0), Some(0.0));
        assert!(engine.is_in_range(0, 0));
    }

    #[test]
    fn test_partial_weight() {
        // d = 0.25, r = 0.5 -> s = 0.5 * 1.1 = 0.55
        let mut engine = single_at(0.5, 0.75);
        let out = engine.tick(&TickInput::new().with_sample(0, 10.0));
        assert!((out.mix[0] - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_mix_is_average_not_sum() {
        let mut engine = SpatialMixEngine::<2, 1>::new();
        engine.set_position(PointKind::Output, 0, 0.5, 0.5);
        engine.set_position(PointKind::Input, 0, 0.5, 0.5);
        engine.set_position(PointKind::Input, 1, 0.5, 0.5);

        let input = TickInput::new().with_sample(0, 10.0).with_sample(1, 4.0);
        let out = engine.tick(&input);
        assert!((out.mix[0] - 7.0).abs() < 1e-6);
        assert_eq!(out.pass_through, [10.0, 4.0]);
    }

    #[test]
    fn test_samples_are_clamped() {
        let mut engine = single_at(0.5, 0.5);
        let out = engine.tick(&TickInput::new().with_sample(0, 25.0));
        assert_eq!(out.mix[0], 10.0);

        let out = engine.tick(&TickInput::new().with_sample(0, -5.0));
        assert_eq!(out.mix[0], 0.0);

        let out = engine.tick(&TickInput::new().with_sample(0, f32::NAN));
        assert_eq!(out.mix[0], 0.0);
    }

    #[test]
    fn test_pass_through_accumulates_across_outputs() {
        // One input, two outputs both on top of it: 4V reaches each output,
        // so the pass-through sees 8V within a single tick.
        let mut engine = SpatialMixEngine::<1, 2>::new();
        engine.set_position(PointKind::Input, 0, 0.5, 0.5);
        engine.set_position(PointKind::Output, 0, 0.5, 0.5);
        engine.set_position(PointKind::Output, 1, 0.5, 0.5);

        let out = engine.tick(&TickInput::new().with_sample(0, 4.0));
        assert_eq!(out.mix, [4.0, 4.0]);
        assert_eq!(out.pass_through[0], 8.0);

        // ...and is clamped once at the end
        let out = engine.tick(&TickInput::new().with_sample(0, 9.0));
        assert_eq!(out.pass_through[0], 10.0);

        // Nothing leaks into the next tick
        let out = engine.tick(&TickInput::new().with_sample(0, 1.0));
        assert_eq!(out.pass_through[0], 2.0);
    }

    #[test]
    fn test_output_override_sticks() {
        let mut engine = single_at(0.0, 0.0);
        let mut input = TickInput::new().with_sample(0, 10.0);
        input.output_overrides[0] = PositionOverride::both(5.0, 5.0);
        let out = engine.tick(&input);
        assert_eq!(out.mix[0], 10.0);

        // Unpatching keeps the last driven coordinate
        let out = engine.tick(&TickInput::new().with_sample(0, 10.0));
        assert_eq!(out.mix[0], 10.0);
        assert_eq!(engine.position(PointKind::Output, 0), Some(Position::new(0.5, 0.5)));
    }

    #[test]
    fn test_input_override_single_axis() {
        let mut engine = single_at(0.5, 0.5);
        let mut input = TickInput::new();
        input.input_overrides[0] = PositionOverride { x: Some(10.0), y: None };
        engine.tick(&input);
        assert_eq!(engine.position(PointKind::Input, 0), Some(Position::new(1.0, 0.5)));
        assert!((engine.distance(0, 0).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_input_override_moves_only_its_point() {
        let fresh = Arena::new();
        let mut engine = Arena::new();
        let mut input = ArenaInput::new();
        input.input_overrides[5] = PositionOverride { x: Some(5.0), y: None };
        engine.tick(&input);

        for j in 0..IN_PORTS {
            let expected = if j == 5 {
                fresh.position(PointKind::Input, 5).map(|p| Position::new(0.5, p.y))
            } else {
                fresh.position(PointKind::Input, j)
            };
            assert_eq!(engine.position(PointKind::Input, j), expected, "input {}", j);
        }
        for i in 0..MIX_PORTS {
            assert_eq!(
                engine.position(PointKind::Output, i),
                fresh.position(PointKind::Output, i)
            );
        }
    }

    #[test]
    fn test_select_trigger_selects_output() {
        let mut engine = Arena::new();
        engine.set_selection(PointKind::Input, 3);

        let mut input = ArenaInput::new();
        input.select_triggers[1] = 1.0;
        engine.tick(&input);
        assert!(engine.is_selected(PointKind::Output, 1));

        // Held trigger does not re-fire after the user picks something else
        engine.set_selection(PointKind::Input, 2);
        engine.tick(&input);
        assert!(engine.is_selected(PointKind::Input, 2));
    }

    #[test]
    fn test_selection_api() {
        let mut engine = Arena::new();
        engine.set_selection(PointKind::Output, 0);
        let once = engine.selection();
        engine.set_selection(PointKind::Output, 0);
        assert_eq!(engine.selection(), once);
        assert!(engine.is_selected(PointKind::Output, 0));
        assert!(!engine.is_selected(PointKind::Input, 0));

        // Out of range is ignored
        engine.set_selection(PointKind::Input, IN_PORTS);
        assert_eq!(engine.selection(), once);

        engine.clear_selection();
        for j in 0..IN_PORTS {
            assert!(!engine.is_selected(PointKind::Input, j));
        }
        for i in 0..MIX_PORTS {
            assert!(!engine.is_selected(PointKind::Output, i));
        }
    }

    #[test]
    fn test_selection_does_not_affect_output() {
        let mut a = single_at(0.5, 0.6);
        let mut b = a.clone();
        b.set_selection(PointKind::Input, 0);
        let input = TickInput::new().with_sample(0, 7.0);
        assert_eq!(a.tick(&input), b.tick(&input));
    }

    #[test]
    fn test_set_radius_clamps() {
        let mut engine = Arena::new();
        engine.set_radius(0, 1.5);
        assert_eq!(engine.radius(0), Some(1.0));
        engine.set_radius(0, -0.5);
        assert_eq!(engine.radius(0), Some(0.0));
        engine.set_radius(0, f32::NAN);
        assert_eq!(engine.radius(0), Some(0.0));
        engine.set_radius(IN_PORTS, 0.3);
        assert_eq!(engine.radius(IN_PORTS), None);
    }

    #[test]
    fn test_zero_radius_disables_point() {
        let mut engine = single_at(0.5, 0.5);
        engine.set_radius(0, 0.0);
        let out = engine.tick(&TickInput::new().with_sample(0, 10.0));
        assert_eq!(out.mix[0], 0.0);
        assert!(out.mix[0].is_finite());
    }

    #[test]
    fn test_drag_scales_and_clamps() {
        let mut engine = Arena::new();
        engine.set_position(PointKind::Output, 0, 0.5, 0.5);
        engine.drag(PointKind::Output, 0, 0.5, -0.5);
        let p = engine.position(PointKind::Output, 0).unwrap();
        assert!((p.x - 0.65).abs() < 1e-6);
        assert!((p.y - 0.35).abs() < 1e-6);

        engine.drag(PointKind::Output, 0, 100.0, 100.0);
        assert_eq!(engine.position(PointKind::Output, 0), Some(Position::new(1.0, 1.0)));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let config = ArenaConfig {
            default_radius: 0.25,
            ..ArenaConfig::default()
        };
        let mut engine = Arena::with_config(&config);
        assert_eq!(engine.radius(0), Some(0.25));

        engine.set_radius(2, 0.9);
        engine.set_position(PointKind::Input, 2, 0.7, 0.7);
        engine.set_selection(PointKind::Input, 2);
        engine.reset();

        assert_eq!(engine.radius(2), Some(0.25));
        assert_eq!(engine.selection(), None);
        assert_eq!(
            engine.position(PointKind::Input, 2),
            Arena::with_config(&config).position(PointKind::Input, 2)
        );
    }

    #[test]
    fn test_apply_commands() {
        let mut engine = Arena::new();
        engine.apply(ArenaCommand::SetRadius { input: 1, radius: 0.2 });
        engine.apply(ArenaCommand::Select { kind: PointKind::Input, index: 1 });
        engine.apply(ArenaCommand::SetPosition {
            kind: PointKind::Input,
            index: 1,
            x: 0.4,
            y: 0.6,
        });
        assert_eq!(engine.radius(1), Some(0.2));
        assert!(engine.is_selected(PointKind::Input, 1));
        assert_eq!(engine.position(PointKind::Input, 1), Some(Position::new(0.4, 0.6)));

        engine.apply(ArenaCommand::ClearSelection);
        assert_eq!(engine.selection(), None);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut engine = Arena::new();
        engine.set_radius(0, 0.25);
        engine.set_radius(7, 1.0);
        let state = engine.to_state();

        let mut fresh = Arena::new();
        assert_eq!(fresh.restore(&state), IN_PORTS);
        assert_eq!(fresh.radii(), engine.radii());
    }

    #[test]
    fn test_restore_keeps_prior_on_bad_entries() {
        let mut engine = Arena::new();
        engine.set_radius(1, 0.3);
        let state = ArenaState {
            radius: vec![Some(0.75), None, Some(4.0), Some(f32::NAN)],
        };
        assert_eq!(engine.restore(&state), 1);
        assert_eq!(engine.radius(0), Some(0.75));
        assert_eq!(engine.radius(1), Some(0.3));
        assert_eq!(engine.radius(2), Some(0.5));
        assert_eq!(engine.radius(3), Some(0.5));
        assert_eq!(engine.radius(4), Some(0.5));
    }
}
