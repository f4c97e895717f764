//! Civil-time helpers: weekday lookup and local-time formatting of JD instants.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::error::TimeError;
use crate::julian::SECONDS_PER_DAY;

/// JD of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    /// 0 = Sunday .. 6 = Saturday.
    pub const fn index(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

fn check_offset(utc_offset_hours: f64) -> Result<(), TimeError> {
    if !utc_offset_hours.is_finite() || utc_offset_hours.abs() > 14.0 {
        return Err(TimeError::InvalidOffset(utc_offset_hours));
    }
    Ok(())
}

/// Weekday of the local civil date containing `jd_utc`.
pub fn weekday_of_jd(jd_utc: f64, utc_offset_hours: f64) -> Result<Weekday, TimeError> {
    check_offset(utc_offset_hours)?;
    let local_jd = jd_utc + utc_offset_hours / 24.0;
    let idx = ((local_jd + 1.5).floor() as i64).rem_euclid(7);
    Ok(ALL_WEEKDAYS[idx as usize])
}

/// Convert a JD (UTC) to a `chrono` timestamp, rounded to the nearest second.
pub fn jd_to_datetime_utc(jd_utc: f64) -> Result<DateTime<Utc>, TimeError> {
    let secs = ((jd_utc - UNIX_EPOCH_JD) * SECONDS_PER_DAY).round();
    if !secs.is_finite() || secs.abs() > i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd_utc));
    }
    DateTime::from_timestamp(secs as i64, 0).ok_or(TimeError::OutOfRange(jd_utc))
}

/// Format a JD (UTC) as local civil time, e.g. `2024-06-01 17:30:00 +05:30`.
pub fn format_jd_local(jd_utc: f64, utc_offset_hours: f64) -> Result<String, TimeError> {
    check_offset(utc_offset_hours)?;
    let offset_secs = (utc_offset_hours * 3600.0).round() as i32;
    let offset =
        FixedOffset::east_opt(offset_secs).ok_or(TimeError::InvalidOffset(utc_offset_hours))?;
    let dt = jd_to_datetime_utc(jd_utc)?.with_timezone(&offset);
    Ok(dt.format("%Y-%m-%d %H:%M:%S %:z").to_string())
}
