//! Arena persisted state: per-input radii

use serde::Serialize;
use serde_json::Value;

use crate::error::StateResult;

use super::parse_object;

/// Saved radii, ordered by input index
///
/// Entries are `None` when the saved value was missing or not a number.
/// Point positions are not part of this state; the host persists them as
/// regular parameter values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArenaState {
    pub radius: Vec<Option<f32>>,
}

impl ArenaState {
    /// Decode a saved document
    ///
    /// A missing or non-array `"radius"` yields no entries; non-numeric
    /// entries decode as `None`.
    pub fn from_json(json: &str) -> StateResult<Self> {
        let root = parse_object(json)?;
        let radius = match root.get("radius") {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|v| v.as_f64().map(|r| r as f32))
                .collect(),
            Some(other) => {
                log::warn!("ArenaState: ignoring non-array radius field: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };
        Ok(Self { radius })
    }

    /// Encode as a JSON document
    pub fn to_json(&self) -> StateResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// `(input, radius)` pairs for every entry in `[0, 1]`
    pub fn valid_radii(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.radius.iter().enumerate().filter_map(|(i, r)| {
            r.filter(|r| (0.0f32..=1.0).contains(r)).map(|r| (i, r))
        })
    }
}
