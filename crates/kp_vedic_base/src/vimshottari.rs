//! The Vimshottari ring: nine lords in fixed cyclic order with year weights
//! summing to 120.
//!
//! Every lookup is a total match over [`Graha`], so rotating the ring at any
//! lord is always defined.

use crate::graha::Graha;

/// Lords in Vimshottari order, starting from Ketu (lord of Ashwini).
pub const VIMSHOTTARI_ORDER: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Length of the full Vimshottari cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Mahadasha length of a lord in years.
pub const fn vimshottari_years(lord: Graha) -> f64 {
    match lord {
        Graha::Ketu => 7.0,
        Graha::Shukra => 20.0,
        Graha::Surya => 6.0,
        Graha::Chandra => 10.0,
        Graha::Mangal => 7.0,
        Graha::Rahu => 18.0,
        Graha::Guru => 16.0,
        Graha::Shani => 19.0,
        Graha::Buddh => 17.0,
    }
}

/// Position of a lord in [`VIMSHOTTARI_ORDER`].
pub const fn vimshottari_position(lord: Graha) -> usize {
    match lord {
        Graha::Ketu => 0,
        Graha::Shukra => 1,
        Graha::Surya => 2,
        Graha::Chandra => 3,
        Graha::Mangal => 4,
        Graha::Rahu => 5,
        Graha::Guru => 6,
        Graha::Shani => 7,
        Graha::Buddh => 8,
    }
}

/// The ring rotated to start at `lord`.
pub fn cycle_from(lord: Graha) -> [Graha; 9] {
    let start = vimshottari_position(lord);
    std::array::from_fn(|i| VIMSHOTTARI_ORDER[(start + i) % 9])
}

/// Star lord of a nakshatra (0-based index; Ashwini → Ketu).
pub fn nakshatra_lord(nakshatra_index: u8) -> Graha {
    VIMSHOTTARI_ORDER[usize::from(nakshatra_index) % 9]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::ALL_GRAHAS;

    #[test]
    fn weights_sum_to_120() {
        let total: f64 = VIMSHOTTARI_ORDER.iter().map(|&g| vimshottari_years(g)).sum();
        assert!((total - VIMSHOTTARI_TOTAL_YEARS).abs() < 1e-12);
    }

    #[test]
    fn positions_match_order() {
        for (i, g) in VIMSHOTTARI_ORDER.iter().enumerate() {
            assert_eq!(vimshottari_position(*g), i);
        }
    }

    #[test]
    fn every_graha_has_a_slot() {
        let mut seen = [false; 9];
        for g in ALL_GRAHAS {
            seen[vimshottari_position(g)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn cycle_from_moon() {
        let c = cycle_from(Graha::Chandra);
        assert_eq!(c[0], Graha::Chandra);
        assert_eq!(c[1], Graha::Mangal);
        assert_eq!(c[8], Graha::Surya);
    }

    #[test]
    fn nakshatra_lords_repeat_every_nine() {
        assert_eq!(nakshatra_lord(0), Graha::Ketu);
        assert_eq!(nakshatra_lord(3), Graha::Chandra);
        assert_eq!(nakshatra_lord(9), Graha::Ketu);
        assert_eq!(nakshatra_lord(26), Graha::Buddh);
    }
}
