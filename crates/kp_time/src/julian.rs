//! Julian Date ↔ Gregorian calendar conversion.
//!
//! Algorithms follow Meeus, "Astronomical Algorithms" (2nd ed), Chapter 7.

/// Julian Date of J2000.0 (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Year length used for every dasha and search-span conversion.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Convert a span in years to days using [`DAYS_PER_YEAR`].
pub fn years_to_days(years: f64) -> f64 {
    years * DAYS_PER_YEAR
}

/// Convert a Gregorian calendar date to a Julian Date.
///
/// `day` may carry a fractional part (e.g. 15.5 = noon on the 15th).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Date back to `(year, month, fractional_day)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}
