//! Persisted module state
//!
//! Each module saves a small JSON object alongside the host patch:
//! - Arena: `{"radius": [0.5, 0.5, ...]}` (one entry per input point)
//! - Strip: `{"mode": 0, "onMode": 0}`
//!
//! Decoding is lenient: missing or malformed fields fall back to defaults (or,
//! for radii, to the engine's current value). Only a document that is not a
//! JSON object is rejected.

mod arena;
mod strip;

pub use arena::ArenaState;
pub use strip::StripState;

use serde_json::Value;

use crate::error::{StateError, StateResult};

/// Parse a document and require a top-level JSON object
fn parse_object(json: &str) -> StateResult<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        other => Err(StateError::NotAnObject(json_type_name(&other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
