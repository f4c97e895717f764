//! KP horary numbers 1..=2193 mapped to an ascendant degree.

use crate::error::VedicError;
use crate::util::normalize_360;

/// Largest horary serial number.
pub const HORARY_MAX: u32 = 2193;

/// Sidereal ascendant for a horary number: `(n - 1) * 360 / 2193`.
pub fn horary_ascendant_deg(number: u32) -> Result<f64, VedicError> {
    if !(1..=HORARY_MAX).contains(&number) {
        return Err(VedicError::HoraryOutOfRange(number));
    }
    Ok(f64::from(number - 1) * 360.0 / f64::from(HORARY_MAX))
}

/// Rotate a cusp table so cusp 1 lands on `ascendant_deg`, keeping the
/// spacing of the other cusps.
pub fn rotate_cusps(cusps: &[f64; 12], ascendant_deg: f64) -> [f64; 12] {
    let shift = ascendant_deg - cusps[0];
    cusps.map(|c| normalize_360(c + shift))
}
