//! Pure KP (Krishnamurti Paddhati) math with no ephemeris dependency.
//!
//! This crate provides:
//! - Graha, rashi and nakshatra tables, and the Vimshottari ring
//! - Sub-lord resolution (star, sub, sub-sub, sookshma) for any degree
//! - KP ayanamsha, ascendant/MC and Placidus/Porphyry/Equal cusps
//! - Immutable chart snapshots and house-of-degree lookup
//! - The five-level Vimshottari dasha tree with window pruning
//! - Significators, Positive/Neutral/Negative classification and the
//!   ruling-planet ranking
//!
//! All longitudes are in degrees; all instants are UTC Julian Dates.

pub mod ayanamsha;
pub mod chart;
pub mod classification;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod horary;
pub mod house;
pub mod lagna;
pub mod location;
pub mod nakshatra;
pub mod rashi;
pub mod ruling;
pub mod sidereal;
pub mod significator;
pub mod sublord;
pub mod util;
pub mod vimshottari;

pub use ayanamsha::{
    KP_AYANAMSHA_CORRECTION_DEG, REFERENCE_AYANAMSHA_J2000_DEG, kp_ayanamsha_deg,
    reference_ayanamsha_deg,
};
pub use chart::ChartSnapshot;
pub use classification::{
    Classification, ClassificationRule, Classified, CuspContext, classify, classify_all,
};
pub use dasha::{
    BIRTH_WINDOW_YEARS, DashaBalance, DashaLevel, DashaNode, DashaSpan, DashaTree, DashaWindow,
    HORARY_WINDOW_YEARS, vimshottari_balance,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, rashi_lord, weekday_lord};
pub use horary::{HORARY_MAX, horary_ascendant_deg, rotate_cusps};
pub use house::{Cusp, HouseSet, house_of_degree, validate_house};
pub use lagna::{HouseSystem, ascendant_deg, house_cusps_deg, mc_deg, mean_obliquity_deg};
pub use location::GeoLocation;
pub use nakshatra::{ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra};
pub use rashi::{ALL_RASHIS, Rashi};
pub use ruling::{RpTier, RulingPlanet, RulingPlanets, base_ruling_planets, rank_ruling_planets};
pub use sidereal::{SiderealPosition, tropical_to_sidereal};
pub use significator::{
    SignificatorSet, Significators, compute_significators, has_positional_status, negate,
};
pub use sublord::{SubLordChain, sub_divisions, sub_lord_chain};
pub use util::{arc_forward, normalize_360, nth_house};
pub use vimshottari::{VIMSHOTTARI_ORDER, VIMSHOTTARI_TOTAL_YEARS, cycle_from, vimshottari_years};
