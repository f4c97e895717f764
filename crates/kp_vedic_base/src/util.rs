//! Shared utility functions for KP calculations.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Forward arc from `a` to `b` in degrees, in [0, 360).
pub fn arc_forward(a: f64, b: f64) -> f64 {
    (b - a).rem_euclid(360.0)
}

/// The house `k` steps clockwise from `base` (1-based, wrapping at 12).
///
/// `nth_house(12, 1)` = 1, `nth_house(1, -1)` = 12.
pub fn nth_house(base: u8, k: i32) -> u8 {
    ((i32::from(base) - 1 + k).rem_euclid(12) + 1) as u8
}
