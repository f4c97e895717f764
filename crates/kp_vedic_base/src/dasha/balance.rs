//! Birth balance: the unexpired share of the first mahadasha.

use serde::Serialize;

use crate::graha::Graha;
use crate::nakshatra::{NAKSHATRA_SPAN_27, nakshatra_offset};
use crate::vimshottari::{nakshatra_lord, vimshottari_years};

/// Where the Moon sits in its nakshatra at the subject instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaBalance {
    /// 0-based nakshatra index (0=Ashwini..26=Revati).
    pub nakshatra_index: u8,
    /// Star lord of the Moon's nakshatra; the first mahadasha lord.
    pub start_lord: Graha,
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub elapsed_fraction: f64,
    /// `1 - elapsed_fraction`.
    pub balance_fraction: f64,
}

impl DashaBalance {
    /// Remaining years of the first mahadasha.
    pub fn balance_years(&self) -> f64 {
        self.balance_fraction * vimshottari_years(self.start_lord)
    }

    /// Years of the first mahadasha already expired before the subject instant.
    pub fn elapsed_years(&self) -> f64 {
        self.elapsed_fraction * vimshottari_years(self.start_lord)
    }
}

/// Compute the Vimshottari balance from the Moon's sidereal longitude.
pub fn vimshottari_balance(moon_sidereal_lon: f64) -> DashaBalance {
    let (nakshatra_index, offset) = nakshatra_offset(moon_sidereal_lon);
    let elapsed_fraction = (offset / NAKSHATRA_SPAN_27).clamp(0.0, 1.0);
    DashaBalance {
        nakshatra_index,
        start_lord: nakshatra_lord(nakshatra_index),
        elapsed_fraction,
        balance_fraction: 1.0 - elapsed_fraction,
    }
}
