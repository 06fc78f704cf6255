//! Common types for Arena
//!
//! This module contains the fundamental value types shared by the spatial
//! mix engine, the command queue and the persisted state: normalized point
//! positions, point kinds, selection and voltage helpers.

/// Number of input points on the standard Arena module
pub const IN_PORTS: usize = 8;

/// Number of output (mix) points on the standard Arena module
pub const MIX_PORTS: usize = 2;

/// Maximum voltage accepted on signal inputs and emitted on outputs
pub const MAX_VOLTAGE: f32 = 10.0;

/// Radius assigned to every input point on construction and reset
pub const DEFAULT_RADIUS: f32 = 0.5;

/// Clamp a signal voltage to the unipolar 0-10V range
///
/// Non-finite voltages (NaN from a broken upstream module) read as 0V.
#[inline]
pub fn clamp_voltage(voltage: f32) -> f32 {
    if voltage.is_nan() {
        return 0.0;
    }
    voltage.clamp(0.0, MAX_VOLTAGE)
}

/// Map a control voltage (0-10V) onto a normalized coordinate
///
/// Returns `None` for NaN so that the stored coordinate is kept.
#[inline]
pub fn voltage_to_coordinate(voltage: f32) -> Option<f32> {
    if voltage.is_nan() {
        None
    } else {
        Some((voltage / MAX_VOLTAGE).clamp(0.0, 1.0))
    }
}

/// Which side of the arena a point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// Signal source with a falloff radius
    Input,
    /// Signal sink producing a mix output
    Output,
}

/// A point position in the unit square
///
/// Both coordinates are kept in `[0, 1]`; every constructor and mutator clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position, clamping both coordinates to `[0, 1]`
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x, 0.0),
            y: clamp_unit(y, 0.0),
        }
    }

    /// Set the x coordinate (clamped). NaN leaves the coordinate unchanged.
    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.x = clamp_unit(x, self.x);
    }

    /// Set the y coordinate (clamped). NaN leaves the coordinate unchanged.
    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.y = clamp_unit(y, self.y);
    }

    /// Move by a delta, clamping the result to the unit square
    #[inline]
    pub fn offset(&mut self, dx: f32, dy: f32) {
        self.set_x(self.x + dx);
        self.set_y(self.y + dy);
    }

    /// Euclidean distance to another position
    #[inline]
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Apply a per-axis voltage override, if present
    #[inline]
    pub fn apply_override(&mut self, ovr: &PositionOverride) {
        if !ovr.is_active() {
            return;
        }
        if let Some(x) = ovr.x.and_then(voltage_to_coordinate) {
            self.x = x;
        }
        if let Some(y) = ovr.y.and_then(voltage_to_coordinate) {
            self.y = y;
        }
    }
}

#[inline]
fn clamp_unit(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Optional per-axis control voltages driving a point position
///
/// `None` means the axis input is unpatched and the stored coordinate is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionOverride {
    /// X control voltage (0-10V maps to 0-1)
    pub x: Option<f32>,
    /// Y control voltage (0-10V maps to 0-1)
    pub y: Option<f32>,
}

impl PositionOverride {
    /// No override on either axis
    pub const NONE: Self = Self { x: None, y: None };

    /// Override both axes
    pub fn both(x: f32, y: f32) -> Self {
        Self { x: Some(x), y: Some(y) }
    }

    /// Whether either axis is patched
    pub fn is_active(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// The currently highlighted point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub kind: PointKind,
    pub index: usize,
}

impl Selection {
    pub fn new(kind: PointKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// Default layout coordinate along a column of `count` points
///
/// Points are spread evenly from 0.1 to 0.9. A single point sits at 0.1.
pub(crate) fn column_coordinate(index: usize, count: usize) -> f32 {
    let spacing = if count > 1 { 0.8 / (count - 1) as f32 } else { 0.0 };
    0.1 + index as f32 * spacing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_voltage() {
        assert_eq!(clamp_voltage(-3.0), 0.0);
        assert_eq!(clamp_voltage(4.5), 4.5);
        assert_eq!(clamp_voltage(12.0), MAX_VOLTAGE);
        assert_eq!(clamp_voltage(f32::NAN), 0.0);
        assert_eq!(clamp_voltage(f32::INFINITY), MAX_VOLTAGE);
    }

    #[test]
    fn test_position_clamps() {
        let p = Position::new(-1.0, 2.0);
        assert_eq!(p, Position { x: 0.0, y: 1.0 });

        let mut p = Position::new(0.5, 0.5);
        p.offset(0.7, -0.7);
        assert_eq!(p, Position { x: 1.0, y: 0.0 });

        p.set_x(f32::NAN);
        assert_eq!(p.x, 1.0);
    }

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
        assert_eq!(b.distance(&b), 0.0);
    }

    #[test]
    fn test_apply_override() {
        let mut p = Position::new(0.2, 0.2);
        p.apply_override(&PositionOverride { x: Some(5.0), y: None });
        assert_eq!(p, Position { x: 0.5, y: 0.2 });

        p.apply_override(&PositionOverride::both(-2.0, 15.0));
        assert_eq!(p, Position { x: 0.0, y: 1.0 });

        p.apply_override(&PositionOverride { x: Some(f32::NAN), y: None });
        assert_eq!(p.x, 0.0);

        assert!(!PositionOverride::NONE.is_active());
        p.apply_override(&PositionOverride::NONE);
        assert_eq!(p, Position { x: 0.0, y: 1.0 });
    }

    #[test]
    fn test_column_coordinate() {
        assert!((column_coordinate(0, 8) - 0.1).abs() < 1e-6);
        assert!((column_coordinate(7, 8) - 0.9).abs() < 1e-6);
        assert!((column_coordinate(1, 2) - 0.9).abs() < 1e-6);
        assert_eq!(column_coordinate(0, 1), 0.1);
    }
}
