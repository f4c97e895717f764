//! Krishnamurti (KP) ayanamsha.
//!
//! KP charts take the Lahiri (Chitrapaksha) ayanamsha as reference and
//! subtract a fixed correction, 0.1 degree by default, which puts the KP
//! value near 23.75 degrees at J2000.0. The reference is anchored at
//! J2000.0 and carried to other epochs with the IAU 2006 general precession
//! in longitude (Capitaine, Wallace & Chapront 2003).

use kp_time::J2000_JD;

/// Lahiri reference ayanamsha at J2000.0 (23°51'), degrees.
pub const REFERENCE_AYANAMSHA_J2000_DEG: f64 = 23.850;

/// Default KP correction subtracted from the reference value, degrees.
pub const KP_AYANAMSHA_CORRECTION_DEG: f64 = 0.1;

/// Julian centuries since J2000.0.
///
/// UTC is used in place of TDB; the difference is about a minute, far below
/// the resolution precession can show.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36525.0
}

/// IAU 2006 general precession in ecliptic longitude, arcseconds.
pub fn general_precession_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// Lahiri reference ayanamsha at a Julian Date, degrees.
pub fn reference_ayanamsha_deg(jd: f64) -> f64 {
    REFERENCE_AYANAMSHA_J2000_DEG + general_precession_arcsec(jd_to_centuries(jd)) / 3600.0
}

/// KP ayanamsha: the reference value less `correction_deg`.
pub fn kp_ayanamsha_deg(jd: f64, correction_deg: f64) -> f64 {
    reference_ayanamsha_deg(jd) - correction_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_at_j2000() {
        assert!((reference_ayanamsha_deg(J2000_JD) - REFERENCE_AYANAMSHA_J2000_DEG).abs() < 1e-12);
    }

    #[test]
    fn kp_value_at_j2000() {
        let kp = kp_ayanamsha_deg(J2000_JD, KP_AYANAMSHA_CORRECTION_DEG);
        assert!((kp - 23.75).abs() < 1e-9, "kp = {kp}");
    }

    #[test]
    fn precession_forward() {
        // ~50.29"/yr → one century adds about 1.397 deg.
        let a = reference_ayanamsha_deg(J2000_JD + 36525.0);
        assert!((a - (REFERENCE_AYANAMSHA_J2000_DEG + 1.3969)).abs() < 0.001, "a = {a}");
    }

    #[test]
    fn precession_backward() {
        let a = reference_ayanamsha_deg(J2000_JD - 36525.0);
        assert!(a < REFERENCE_AYANAMSHA_J2000_DEG - 1.39, "a = {a}");
    }

    #[test]
    fn correction_is_subtracted() {
        let jd = 2_460_000.5;
        let diff = reference_ayanamsha_deg(jd) - kp_ayanamsha_deg(jd, KP_AYANAMSHA_CORRECTION_DEG);
        assert!((diff - 0.1).abs() < 1e-12);
    }
}
