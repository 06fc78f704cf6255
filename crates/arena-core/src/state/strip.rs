//! Strip persisted state

use serde::Serialize;
use serde_json::Value;

use crate::error::StateResult;
use crate::strip::{OnMode, StripMode};

use super::parse_object;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StripState {
    pub mode: StripMode,
    #[serde(rename = "onMode")]
    pub on_mode: OnMode,
}

impl StripState {
    /// Decode a saved document
    ///
    /// Missing or out-of-range values fall back to the defaults.
    pub fn from_json(json: &str) -> StateResult<Self> {
        let root = parse_object(json)?;
        Ok(Self {
            mode: read_enum(&root, "mode"),
            on_mode: read_enum(&root, "onMode"),
        })
    }

    pub fn to_json(&self) -> StateResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Read an integer-coded enum field, falling back to its default
fn read_enum<T>(root: &serde_json::Map<String, Value>, key: &str) -> T
where
    T: TryFrom<i64, Error = String> + Default,
{
    let Some(value) = root.get(key) else {
        return T::default();
    };
    let Some(index) = value.as_i64() else {
        log::warn!("StripState: ignoring non-integer {} field: {}", key, value);
        return T::default();
    };
    T::try_from(index).unwrap_or_else(|e| {
        log::warn!("StripState: {}, using default", e);
        T::default()
    })
}
