//! Greenwich and local mean sidereal time in degrees.
//!
//! UT1 is approximated by UTC; the sub-second difference is below the
//! resolution of a 2-minute scan step.
//!
//! Source: IERS Conventions 2010 (ERA, Eq. 5.15) and Capitaine et al. 2003
//! (GMST polynomial).

use crate::julian::J2000_JD;

/// Greenwich Mean Sidereal Time in degrees, [0, 360).
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let era_turns = 0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du;
    let t = du / 36_525.0;
    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t * t;
    (era_turns.fract() * 360.0 + poly_arcsec / 3600.0).rem_euclid(360.0)
}

/// Local Mean Sidereal Time in degrees for an east-positive longitude.
pub fn local_sidereal_time_deg(jd_ut: f64, longitude_east_deg: f64) -> f64 {
    (gmst_deg(jd_ut) + longitude_east_deg).rem_euclid(360.0)
}
