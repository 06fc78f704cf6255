//! Strip - group control of neighbouring modules
//!
//! A Strip switches the chain of modules next to it on or off (bypass) and
//! randomizes them, driven by buttons and trigger inputs. This module holds
//! the per-sample control logic only; walking the host's module chain is done
//! by the host through the [`StripGroup`] trait.

mod controller;

pub use controller::*;

use serde::Serialize;

/// Side of the Strip a group extends to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Which neighbours belong to the group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "i64")]
pub enum StripMode {
    /// Modules on both sides
    #[default]
    LeftRight = 0,
    /// Modules to the right only
    Right = 1,
    /// Modules to the left only
    Left = 2,
}

impl StripMode {
    pub fn from_index(idx: i64) -> Option<Self> {
        match idx {
            0 => Some(StripMode::LeftRight),
            1 => Some(StripMode::Right),
            2 => Some(StripMode::Left),
            _ => None,
        }
    }

    /// Next mode in the button cycle: LeftRight -> Right -> Left -> LeftRight
    pub fn next(self) -> Self {
        match self {
            StripMode::LeftRight => StripMode::Right,
            StripMode::Right => StripMode::Left,
            StripMode::Left => StripMode::LeftRight,
        }
    }

    /// Sides covered by this mode, right side first
    pub fn sides(self) -> &'static [Side] {
        match self {
            StripMode::LeftRight => &[Side::Right, Side::Left],
            StripMode::Right => &[Side::Right],
            StripMode::Left => &[Side::Left],
        }
    }

    pub fn includes(self, side: Side) -> bool {
        self.sides().contains(&side)
    }
}

impl From<StripMode> for i64 {
    fn from(mode: StripMode) -> Self {
        mode as i64
    }
}

impl TryFrom<i64> for StripMode {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        StripMode::from_index(value).ok_or_else(|| format!("invalid strip mode {}", value))
    }
}

/// How the "on" button/input behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "i64")]
pub enum OnMode {
    /// Trigger switches the group on
    #[default]
    Default = 0,
    /// Trigger flips the group between on and off
    Toggle = 1,
    /// Gate level: high = on, low = off
    HighLow = 2,
}

impl OnMode {
    pub fn from_index(idx: i64) -> Option<Self> {
        match idx {
            0 => Some(OnMode::Default),
            1 => Some(OnMode::Toggle),
            2 => Some(OnMode::HighLow),
            _ => None,
        }
    }
}

impl From<OnMode> for i64 {
    fn from(mode: OnMode) -> Self {
        mode as i64
    }
}

impl TryFrom<i64> for OnMode {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        OnMode::from_index(value).ok_or_else(|| format!("invalid on-mode {}", value))
    }
}
