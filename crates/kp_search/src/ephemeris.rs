//! The ephemeris contract the chart builder consumes.
//!
//! Planetary positions and cusps are an external service: anything that can
//! answer "tropical longitude of body X at instant t" and "tropical cusps at
//! instant t for this place" can drive the search. [`MeanMotionEphemeris`]
//! is a self-contained linear model used by the CLI demo, tests and
//! benchmarks. It is far too coarse for real predictions.

use kp_time::{J2000_JD, local_sidereal_time_deg};
use kp_vedic_base::{
    GeoLocation, Graha, HouseSystem, house_cusps_deg, mean_obliquity_deg, normalize_360,
    reference_ayanamsha_deg,
};

use crate::error::EphemerisError;

/// Tropical positions and cusps as a pure function of instant and place.
///
/// Implementations must be stateless from the caller's point of view; the
/// search may query any instant in any order.
pub trait Ephemeris: Send + Sync {
    /// Tropical ecliptic longitude in degrees `[0, 360)`.
    ///
    /// The chart builder never asks for Ketu; it places Ketu opposite Rahu.
    fn tropical_longitude(&self, jd_utc: f64, graha: Graha) -> Result<f64, EphemerisError>;

    /// Twelve tropical cusp longitudes, house 1 first.
    fn tropical_cusps(
        &self,
        jd_utc: f64,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<[f64; 12], EphemerisError>;

    /// Lahiri reference ayanamsha in degrees; the chart builder subtracts
    /// the configured KP correction.
    fn ayanamsha_deg(&self, jd_utc: f64) -> f64 {
        reference_ayanamsha_deg(jd_utc)
    }
}

/// Mean longitude at J2000 and mean daily motion, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MeanElement {
    lon_j2000: f64,
    daily_motion: f64,
}

const fn element(lon_j2000: f64, daily_motion: f64) -> MeanElement {
    MeanElement {
        lon_j2000,
        daily_motion,
    }
}

/// Sun..Rahu in [`Graha::index`] order (Ketu is derived).
const MEAN_ELEMENTS: [MeanElement; 8] = [
    element(280.466_46, 0.985_647_36),
    element(218.316_5, 13.176_396_48),
    element(355.433, 0.524_020_68),
    element(252.250_9, 4.092_334_45),
    element(34.351_5, 0.083_085_29),
    element(181.979_8, 1.602_130_34),
    element(50.077_4, 0.033_444_14),
    // Mean lunar node regresses.
    element(125.044_5, -0.052_953_77),
];

/// Linear mean-longitude model with cusps from local mean sidereal time.
///
/// Valid for roughly ±3000 years around J2000; instants outside that range
/// are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanMotionEphemeris;

impl MeanMotionEphemeris {
    /// Days from J2000 beyond which the model refuses to answer.
    pub const MAX_SPAN_DAYS: f64 = 3000.0 * 365.25;

    fn days_since_j2000(jd_utc: f64) -> Result<f64, EphemerisError> {
        let d = jd_utc - J2000_JD;
        if !d.is_finite() || d.abs() > Self::MAX_SPAN_DAYS {
            return Err(EphemerisError::OutOfRange(jd_utc));
        }
        Ok(d)
    }
}

impl Ephemeris for MeanMotionEphemeris {
    fn tropical_longitude(&self, jd_utc: f64, graha: Graha) -> Result<f64, EphemerisError> {
        let d = Self::days_since_j2000(jd_utc)?;
        let el = MEAN_ELEMENTS
            .get(usize::from(graha.index()))
            .ok_or(EphemerisError::UnsupportedBody(graha))?;
        Ok(normalize_360(el.lon_j2000 + el.daily_motion * d))
    }

    fn tropical_cusps(
        &self,
        jd_utc: f64,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<[f64; 12], EphemerisError> {
        Self::days_since_j2000(jd_utc)?;
        location.validate()?;
        let lst = local_sidereal_time_deg(jd_utc, location.longitude_deg);
        let eps = mean_obliquity_deg(jd_utc);
        Ok(house_cusps_deg(system, lst, location.latitude_deg, eps)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_advances_about_a_degree_per_day() {
        let e = MeanMotionEphemeris;
        let a = e.tropical_longitude(J2000_JD, Graha::Surya).unwrap();
        let b = e.tropical_longitude(J2000_JD + 1.0, Graha::Surya).unwrap();
        assert!((normalize_360(b - a) - 0.9856).abs() < 1e-3);
    }

    #[test]
    fn mean_node_moves_backwards() {
        let e = MeanMotionEphemeris;
        let a = e.tropical_longitude(J2000_JD, Graha::Rahu).unwrap();
        let b = e.tropical_longitude(J2000_JD + 10.0, Graha::Rahu).unwrap();
        assert!(normalize_360(a - b) < 1.0);
    }

    #[test]
    fn ketu_is_not_modelled() {
        let err = MeanMotionEphemeris
            .tropical_longitude(J2000_JD, Graha::Ketu)
            .unwrap_err();
        assert_eq!(err, EphemerisError::UnsupportedBody(Graha::Ketu));
    }

    #[test]
    fn rejects_far_instants() {
        let err = MeanMotionEphemeris
            .tropical_longitude(J2000_JD + 5000.0 * 365.25, Graha::Surya)
            .unwrap_err();
        assert!(matches!(err, EphemerisError::OutOfRange(_)));
    }

    #[test]
    fn cusps_follow_house_system() {
        let delhi = GeoLocation::new(28.61, 77.21).unwrap();
        let e = MeanMotionEphemeris;
        let eq = e.tropical_cusps(J2000_JD, &delhi, HouseSystem::Equal).unwrap();
        let pl = e.tropical_cusps(J2000_JD, &delhi, HouseSystem::Placidus).unwrap();
        assert!((eq[0] - pl[0]).abs() < 1e-9);
        assert!((normalize_360(eq[1] - eq[0]) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn polar_placidus_surfaces_as_cusp_error() {
        let polar = GeoLocation::new(75.0, 20.0).unwrap();
        let err = MeanMotionEphemeris
            .tropical_cusps(J2000_JD, &polar, HouseSystem::Placidus)
            .unwrap_err();
        assert!(matches!(err, EphemerisError::Cusps(_)));
    }
}
