//! UTC calendar date/time with sub-second precision.

use std::str::FromStr;

use serde::Serialize;

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, jd_to_calendar};

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            if leap { 29 } else { 28 }
        }
    }
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Construct and validate every calendar field.
    pub fn try_new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let t = Self::new(year, month, day, hour, minute, second);
        t.validate()?;
        Ok(t)
    }

    /// Check that all fields form a real Gregorian timestamp.
    pub fn validate(&self) -> Result<(), TimeError> {
        let bad = |field: &'static str, value: String| TimeError::InvalidField { field, value };
        if !(1..=12).contains(&self.month) {
            return Err(bad("month", self.month.to_string()));
        }
        if self.day == 0 || self.day > days_in_month(self.year, self.month) {
            return Err(bad("day", self.day.to_string()));
        }
        if self.hour > 23 {
            return Err(bad("hour", self.hour.to_string()));
        }
        if self.minute > 59 {
            return Err(bad("minute", self.minute.to_string()));
        }
        if !(0.0..60.0).contains(&self.second) {
            return Err(bad("second", self.second.to_string()));
        }
        Ok(())
    }

    /// Julian Date on the UTC scale.
    pub fn to_jd(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / 86_400.0;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Calendar form of a UTC Julian Date.
    pub fn from_jd(jd: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd);
        let day = day_frac.floor() as u32;
        // Millisecond rounding keeps 12:00:00 from decoding as 11:59:59.999.
        let total_seconds = ((day_frac.fract() * 86_400_000.0).round() / 1000.0).min(86_399.999);
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Parse `YYYY-MM-DDThh:mm:ss[Z]` (seconds may be fractional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeError::Parse(s.to_string());
        let trimmed = s.trim().trim_end_matches('Z');
        let (date, time) = trimmed.split_once('T').ok_or_else(err)?;

        let mut d = date.splitn(3, '-');
        let mut t = time.splitn(3, ':');
        let year: i32 = d.next().and_then(|v| v.parse().ok()).ok_or_else(err)?;
        let month: u32 = d.next().and_then(|v| v.parse().ok()).ok_or_else(err)?;
        let day: u32 = d.next().and_then(|v| v.parse().ok()).ok_or_else(err)?;
        let hour: u32 = t.next().and_then(|v| v.parse().ok()).ok_or_else(err)?;
        let minute: u32 = t.next().and_then(|v| v.parse().ok()).ok_or_else(err)?;
        let second: f64 = t.next().map_or(Some(0.0), |v| v.parse().ok()).ok_or_else(err)?;

        Self::try_new(year, month, day, hour, minute, second)
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second as u32
        )
    }
}
