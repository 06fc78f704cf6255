//! Distance falloff curve
//!
//! A linear ramp from 0 at the radius boundary up to full weight, saturating
//! at 1 over the inner ~91% of the radius:
//!
//! ```text
//! s = min(1, (radius - d) / radius * 1.1)     for d < radius
//! s = 0                                       otherwise
//! ```

/// Slope multiplier of the falloff ramp
pub const FALLOFF_GAIN: f32 = 1.1;

/// Whether a point at `distance` lies strictly inside `radius`
///
/// A radius of zero (or NaN) disables the point entirely.
#[inline]
pub fn within_radius(distance: f32, radius: f32) -> bool {
    radius > 0.0 && distance < radius
}

/// Contribution weight in `[0, 1]` for a source at `distance` with `radius`
#[inline]
pub fn contribution_weight(distance: f32, radius: f32) -> f32 {
    if !within_radius(distance, radius) {
        return 0.0;
    }
    ((radius - distance) / radius * FALLOFF_GAIN).min(1.0)
}
