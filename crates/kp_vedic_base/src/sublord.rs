//! KP sub-lord hierarchy: star, sub, sub-sub and sookshma lords.
//!
//! Each nakshatra is split into nine unequal subs proportional to the
//! Vimshottari weights, starting from the nakshatra's own lord. The same
//! proportional split is applied again inside the sub, and once more inside
//! the sub-sub, giving the sookshma lord.
//!
//! A point exactly on a division boundary belongs to the next lord.

use serde::Serialize;

use crate::graha::Graha;
use crate::nakshatra::{NAKSHATRA_SPAN_27, Nakshatra, nakshatra_offset};
use crate::vimshottari::{VIMSHOTTARI_TOTAL_YEARS, cycle_from, nakshatra_lord, vimshottari_years};

/// The lord chain for one sidereal degree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubLordChain {
    pub nakshatra: Nakshatra,
    pub star_lord: Graha,
    pub sub_lord: Graha,
    pub sub_sub_lord: Graha,
    pub sookshma_lord: Graha,
}

/// One proportional division of a parent span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Division {
    pub lord: Graha,
    /// Offset from the parent's start, degrees.
    pub start: f64,
    /// Offset from the parent's start, degrees (exclusive).
    pub end: f64,
}

impl Division {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Split `span` into nine divisions starting at `lord`.
///
/// The last division's end is snapped to `span` so the nine always tile
/// the parent exactly.
pub fn sub_divisions(lord: Graha, span: f64) -> [Division; 9] {
    let ring = cycle_from(lord);
    let mut cursor = 0.0;
    let mut out = [Division {
        lord,
        start: 0.0,
        end: 0.0,
    }; 9];
    for (slot, g) in out.iter_mut().zip(ring) {
        let end = cursor + vimshottari_years(g) / VIMSHOTTARI_TOTAL_YEARS * span;
        *slot = Division {
            lord: g,
            start: cursor,
            end,
        };
        cursor = end;
    }
    out[8].end = span;
    out
}

/// Find the division of `span` (rotated at `lord`) that contains `offset`.
///
/// Returns `(division_lord, division_span, offset_within_division)`.
fn subdivide(lord: Graha, span: f64, offset: f64) -> (Graha, f64, f64) {
    let divisions = sub_divisions(lord, span);
    let hit = divisions[..8]
        .iter()
        .find(|d| offset < d.end)
        .unwrap_or(&divisions[8]);
    let within = (offset - hit.start).clamp(0.0, hit.span());
    (hit.lord, hit.span(), within)
}

/// Resolve the full KP lord chain for a sidereal longitude.
///
/// Defined for every longitude; values outside [0, 360) are normalized.
pub fn sub_lord_chain(sidereal_lon_deg: f64) -> SubLordChain {
    let (nak_idx, offset) = nakshatra_offset(sidereal_lon_deg);
    let star_lord = nakshatra_lord(nak_idx);

    let (sub_lord, sub_span, sub_offset) = subdivide(star_lord, NAKSHATRA_SPAN_27, offset);
    let (sub_sub_lord, ss_span, ss_offset) = subdivide(sub_lord, sub_span, sub_offset);
    let (sookshma_lord, _, _) = subdivide(sub_sub_lord, ss_span, ss_offset);

    SubLordChain {
        nakshatra: Nakshatra::from_index(nak_idx),
        star_lord,
        sub_lord,
        sub_sub_lord,
        sookshma_lord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisions_tile_parent() {
        for lord in crate::vimshottari::VIMSHOTTARI_ORDER {
            let d = sub_divisions(lord, NAKSHATRA_SPAN_27);
            assert_eq!(d[0].lord, lord);
            assert!(d[0].start.abs() < 1e-15);
            for w in d.windows(2) {
                assert!((w[0].end - w[1].start).abs() < 1e-12);
            }
            assert!((d[8].end - NAKSHATRA_SPAN_27).abs() < 1e-15);
        }
    }

    #[test]
    fn ashwini_start_is_all_ketu() {
        let c = sub_lord_chain(0.0);
        assert_eq!(c.nakshatra, Nakshatra::Ashwini);
        assert_eq!(c.star_lord, Graha::Ketu);
        assert_eq!(c.sub_lord, Graha::Ketu);
        assert_eq!(c.sub_sub_lord, Graha::Ketu);
        assert_eq!(c.sookshma_lord, Graha::Ketu);
    }

    #[test]
    fn first_sub_boundary_goes_to_next_lord() {
        // Ketu sub in Ashwini ends at 7/120 of the nakshatra.
        let boundary = 7.0 / 120.0 * NAKSHATRA_SPAN_27;
        assert_eq!(sub_lord_chain(boundary - 1e-9).sub_lord, Graha::Ketu);
        assert_eq!(sub_lord_chain(boundary).sub_lord, Graha::Shukra);
    }

    #[test]
    fn moon_at_fifty_degrees() {
        // Rohini (Moon star), offset 10.0. Moon-ring subs:
        // Mo 0-1.1111, Ma -1.8889, Ra -3.8889, Ju -5.6667, Sa -7.7778,
        // Me -9.6667, Ke -10.4444 → Ketu sub, 0.3333 into a 0.7778 span.
        // Ketu-ring sub-subs end at Ra 0.4407 (from 0.3241) → Rahu,
        // 0.00926 into a 0.11667 span. The first Rahu sookshma spans 0.0175.
        let c = sub_lord_chain(50.0);
        assert_eq!(c.nakshatra, Nakshatra::Rohini);
        assert_eq!(c.star_lord, Graha::Chandra);
        assert_eq!(c.sub_lord, Graha::Ketu);
        assert_eq!(c.sub_sub_lord, Graha::Rahu);
        assert_eq!(c.sookshma_lord, Graha::Rahu);
    }

    #[test]
    fn last_degree_is_defined() {
        let c = sub_lord_chain(359.999_999_999);
        assert_eq!(c.nakshatra, Nakshatra::Revati);
        assert_eq!(c.star_lord, Graha::Buddh);
        // Mercury ring ends with Saturn.
        assert_eq!(c.sub_lord, Graha::Shani);
    }

    #[test]
    fn wraps_out_of_range_input() {
        assert_eq!(sub_lord_chain(410.0), sub_lord_chain(50.0));
        assert_eq!(sub_lord_chain(-310.0), sub_lord_chain(50.0));
    }
}
