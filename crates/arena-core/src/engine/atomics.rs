//! Lock-free engine state for UI access
//!
//! The audio thread owns the engine exclusively. Every few hundred ticks it
//! copies the state the UI needs for drawing (positions, radii, distances and
//! the selection) into these atomics; the UI thread reads them without ever
//! touching the engine.
//!
//! All operations use `Ordering::Relaxed` since each field is read
//! independently; a frame drawn from slightly mixed generations is harmless.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::types::{PointKind, Position, Selection};

use super::{within_radius, SpatialMixEngine};

/// An `f32` stored as its bit pattern in an `AtomicU32`
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Sentinel for "nothing selected"
const NO_SELECTION: u32 = u32::MAX;
/// High bit marks an output point
const OUTPUT_BIT: u32 = 1 << 31;

/// Pack a selection into one word so kind and index are never torn
fn encode_selection(selection: Option<Selection>) -> u32 {
    match selection {
        None => NO_SELECTION,
        Some(Selection { kind: PointKind::Input, index }) => index as u32 & !OUTPUT_BIT,
        Some(Selection { kind: PointKind::Output, index }) => (index as u32 & !OUTPUT_BIT) | OUTPUT_BIT,
    }
}

fn decode_selection(word: u32) -> Option<Selection> {
    if word == NO_SELECTION {
        None
    } else if word & OUTPUT_BIT != 0 {
        Some(Selection::new(PointKind::Output, (word & !OUTPUT_BIT) as usize))
    } else {
        Some(Selection::new(PointKind::Input, word as usize))
    }
}

/// Published snapshot of a [`SpatialMixEngine`]
pub struct ArenaAtomics<const IN: usize, const MIX: usize> {
    inputs: [[AtomicF32; 2]; IN],
    outputs: [[AtomicF32; 2]; MIX],
    radius: [AtomicF32; IN],
    dist: [[AtomicF32; IN]; MIX],
    selection: AtomicU32,
    /// Number of publications so far
    generation: AtomicU64,
}

impl<const IN: usize, const MIX: usize> ArenaAtomics<IN, MIX> {
    /// Create atomics holding the engine's current state
    pub fn new(engine: &SpatialMixEngine<IN, MIX>) -> Self {
        let atomics = Self {
            inputs: std::array::from_fn(|_| Default::default()),
            outputs: std::array::from_fn(|_| Default::default()),
            radius: std::array::from_fn(|_| AtomicF32::default()),
            dist: std::array::from_fn(|_| std::array::from_fn(|_| AtomicF32::default())),
            selection: AtomicU32::new(NO_SELECTION),
            generation: AtomicU64::new(0),
        };
        atomics.store(engine);
        atomics
    }

    fn store(&self, engine: &SpatialMixEngine<IN, MIX>) {
        for (j, slot) in self.inputs.iter().enumerate() {
            if let Some(p) = engine.position(PointKind::Input, j) {
                slot[0].store(p.x);
                slot[1].store(p.y);
            }
        }
        for (i, slot) in self.outputs.iter().enumerate() {
            if let Some(p) = engine.position(PointKind::Output, i) {
                slot[0].store(p.x);
                slot[1].store(p.y);
            }
        }
        for (slot, &r) in self.radius.iter().zip(engine.radii().iter()) {
            slot.store(r);
        }
        for (row, src) in self.dist.iter().zip(engine.distances().iter()) {
            for (slot, &d) in row.iter().zip(src.iter()) {
                slot.store(d);
            }
        }
        self.selection
            .store(encode_selection(engine.selection()), Ordering::Relaxed);
    }

    /// Copy the engine state (audio thread, RT-safe)
    pub fn publish(&self, engine: &SpatialMixEngine<IN, MIX>) {
        self.store(engine);
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of publications so far
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn position(&self, kind: PointKind, index: usize) -> Option<Position> {
        let slot = match kind {
            PointKind::Input => self.inputs.get(index)?,
            PointKind::Output => self.outputs.get(index)?,
        };
        Some(Position::new(slot[0].load(), slot[1].load()))
    }

    #[inline]
    pub fn radius(&self, input: usize) -> Option<f32> {
        self.radius.get(input).map(AtomicF32::load)
    }

    #[inline]
    pub fn distance(&self, output: usize, input: usize) -> Option<f32> {
        self.dist.get(output)?.get(input).map(AtomicF32::load)
    }

    /// Whether a connection line should be drawn between the two points
    #[inline]
    pub fn is_in_range(&self, output: usize, input: usize) -> bool {
        match (self.distance(output, input), self.radius(input)) {
            (Some(d), Some(r)) => within_radius(d, r),
            _ => false,
        }
    }

    #[inline]
    pub fn selection(&self) -> Option<Selection> {
        decode_selection(self.selection.load(Ordering::Relaxed))
    }

    /// Selection light state for a point
    #[inline]
    pub fn is_selected(&self, kind: PointKind, index: usize) -> bool {
        self.selection() == Some(Selection::new(kind, index))
    }
}
