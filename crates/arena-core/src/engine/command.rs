//! Lock-free command queue for UI edits
//!
//! Pointer drags, radius sliders and clicks happen on the UI thread while the
//! engine ticks on the audio thread. Edits are pushed onto an `rtrb` SPSC
//! ringbuffer and applied by the audio thread between ticks, so a tick never
//! sees a half-applied edit and neither side ever blocks.
//!
//! # Usage
//!
//! ```ignore
//! let (mut processor, mut sender, atomics) = arena_channel(Arena::new(), &ArenaConfig::default());
//!
//! // UI thread
//! sender.send(ArenaCommand::SetRadius { input: 0, radius: 0.3 })?;
//!
//! // Audio thread
//! let out = processor.process(&frame);
//! ```

use crate::types::PointKind;

/// Edits sent from the UI thread to the audio thread
///
/// Every variant is plain data (`Copy`, no heap) so pushing and popping
/// never allocates or frees on the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaCommand {
    /// Move a point to an absolute position
    SetPosition {
        kind: PointKind,
        index: usize,
        x: f32,
        y: f32,
    },
    /// Pointer drag delta, normalized to the arena area
    Drag {
        kind: PointKind,
        index: usize,
        dx: f32,
        dy: f32,
    },
    /// Set an input point's falloff radius
    SetRadius { input: usize, radius: f32 },
    /// Highlight a point (click or context menu)
    Select { kind: PointKind, index: usize },
    /// Click on empty arena space
    ClearSelection,
    /// Module reset: default layout, default radii, no selection
    Reset,
}

/// Default capacity of the command queue
///
/// A restore sends one command per input point; drags arrive at UI frame
/// rate. 256 leaves plenty of headroom at a few KB.
pub const COMMAND_QUEUE_CAPACITY: usize = 256;

/// Create a command queue (producer/consumer pair)
///
/// A capacity of 0 is bumped to 1.
pub fn command_channel(
    capacity: usize,
) -> (rtrb::Producer<ArenaCommand>, rtrb::Consumer<ArenaCommand>) {
    rtrb::RingBuffer::new(capacity.max(1))
}
