//! Audio-thread owner of a spatial mix engine
//!
//! [`arena_channel`] splits an engine into:
//! - [`ArenaProcessor`]: lives on the audio thread, drains commands at tick
//!   boundaries, ticks the engine, publishes state
//! - [`CommandSender`]: lives on the UI thread, queues edits without blocking
//! - [`ArenaAtomics`]: shared, lock-free read view for drawing

use std::sync::Arc;

use crate::config::ArenaConfig;
use crate::dsp::ClockDivider;
use crate::error::CommandError;
use crate::state::ArenaState;

use super::{command_channel, ArenaAtomics, ArenaCommand, SpatialMixEngine, TickInput, TickOutput};

/// Split an engine into its audio-thread processor, UI sender and atomics
pub fn arena_channel<const IN: usize, const MIX: usize>(
    engine: SpatialMixEngine<IN, MIX>,
    config: &ArenaConfig,
) -> (
    ArenaProcessor<IN, MIX>,
    CommandSender,
    Arc<ArenaAtomics<IN, MIX>>,
) {
    let (producer, consumer) = command_channel(config.command_queue_capacity);
    let atomics = Arc::new(ArenaAtomics::new(&engine));
    log::info!(
        "arena_channel: queue capacity {}, publishing every {} ticks",
        config.command_queue_capacity.max(1),
        config.publish_division.max(1)
    );

    let processor = ArenaProcessor {
        engine,
        commands: consumer,
        atomics: Arc::clone(&atomics),
        publish_divider: ClockDivider::new(config.publish_division),
    };
    (processor, CommandSender { producer }, atomics)
}

/// Engine plus its command consumer, owned exclusively by the audio thread
pub struct ArenaProcessor<const IN: usize, const MIX: usize> {
    engine: SpatialMixEngine<IN, MIX>,
    commands: rtrb::Consumer<ArenaCommand>,
    atomics: Arc<ArenaAtomics<IN, MIX>>,
    publish_divider: ClockDivider,
}

impl<const IN: usize, const MIX: usize> ArenaProcessor<IN, MIX> {
    pub fn engine(&self) -> &SpatialMixEngine<IN, MIX> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SpatialMixEngine<IN, MIX> {
        &mut self.engine
    }

    /// Apply every queued command. Returns how many were applied.
    pub fn process_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.pop() {
            self.engine.apply(command);
            applied += 1;
        }
        applied
    }

    /// Process one sample frame
    ///
    /// Pending edits land before the tick; state is published to the atomics
    /// every `publish_division` ticks.
    pub fn process(&mut self, input: &TickInput<IN, MIX>) -> TickOutput<IN, MIX> {
        self.process_commands();
        let output = self.engine.tick(input);
        if self.publish_divider.process() {
            self.atomics.publish(&self.engine);
        }
        output
    }

    /// Process a block of frames, one tick per frame
    ///
    /// Commands are drained before every frame so a block behaves exactly like
    /// repeated [`ArenaProcessor::process`] calls. Processes
    /// `min(inputs.len(), outputs.len())` frames.
    pub fn process_block(
        &mut self,
        inputs: &[TickInput<IN, MIX>],
        outputs: &mut [TickOutput<IN, MIX>],
    ) {
        for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
            *output = self.process(input);
        }
    }

    /// Publish the current state immediately (e.g. right after a load)
    pub fn publish(&self) {
        self.atomics.publish(&self.engine);
    }
}

/// UI-side handle for queueing engine edits
///
/// All operations are non-blocking.
pub struct CommandSender {
    producer: rtrb::Producer<ArenaCommand>,
}

impl CommandSender {
    /// Queue a command
    ///
    /// Returns `Err(command)` if the queue is full.
    pub fn send(&mut self, command: ArenaCommand) -> Result<(), ArenaCommand> {
        self.producer.push(command).map_err(|e| match e {
            rtrb::PushError::Full(value) => {
                log::warn!("CommandSender: queue full, dropping {:?}", value);
                value
            }
        })?;
        // The audio thread never logs
        if command == ArenaCommand::Reset {
            log::debug!("CommandSender: queued engine reset");
        }
        Ok(())
    }

    /// Check if the queue has space for more commands
    pub fn has_space(&self) -> bool {
        self.producer.slots() > 0
    }

    /// Queue a `SetRadius` for every valid radius in a persisted state
    ///
    /// Invalid entries are skipped (the engine keeps its current value).
    /// Either every radius is queued or none is, so a rejected restore never
    /// leaves the engine with a mix of old and new radii.
    /// Returns the number of commands queued.
    pub fn restore_state(&mut self, state: &ArenaState) -> Result<usize, CommandError> {
        let needed = state.valid_radii().count();
        let available = self.producer.slots();
        if available < needed {
            log::warn!(
                "CommandSender: cannot restore {} radii, only {} queue slots free",
                needed,
                available
            );
            return Err(CommandError::QueueFull { needed, available });
        }

        let mut queued = 0;
        for (input, radius) in state.valid_radii() {
            // Capacity was checked above and only this thread pushes
            if self.send(ArenaCommand::SetRadius { input, radius }).is_ok() {
                queued += 1;
            }
        }
        log::debug!("CommandSender: queued {} radii from saved state", queued);
        Ok(queued)
    }
}
