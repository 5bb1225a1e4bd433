//! Small helpers shared by the frame and force crates.

use crate::constants::TWOPI;

/// Normalizes an angle in radians to the range [0, 2π).
#[inline]
pub fn normalize_angle_to_positive(angle: f64) -> f64 {
    let normalized = angle % TWOPI;
    if normalized < 0.0 {
        normalized + TWOPI
    } else {
        normalized
    }
}
