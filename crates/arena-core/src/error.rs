//! Error types for the Arena core
//!
//! The tick path never fails; these cover the edges where the core talks to
//! the outside world: loading persisted state and queueing UI edits.

use thiserror::Error;

/// Errors while decoding a persisted module state document
#[derive(Error, Debug)]
pub enum StateError {
    /// The document is not valid JSON
    #[error("Invalid state JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not an object
    #[error("State document must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Errors while queueing commands for the audio thread
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Not enough free slots for the whole batch; nothing was queued
    #[error("Command queue full: {needed} commands needed, {available} slots free")]
    QueueFull { needed: usize, available: usize },
}

/// Result type for state decoding
pub type StateResult<T> = Result<T, StateError>;
