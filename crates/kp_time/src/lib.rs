//! Time primitives for KP chart computation.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - `UtcTime`, the calendar representation accepted by the CLI and chart inputs
//! - Greenwich / local mean sidereal time for ascendant computation
//! - Weekday lookup and local-time formatting of JD instants
//!
//! All instants inside the workspace are Julian Dates on the UTC scale.

pub mod error;
pub mod julian;
pub mod local;
pub mod sidereal;
pub mod utc_time;

pub use error::TimeError;
pub use julian::{
    DAYS_PER_YEAR, J2000_JD, MINUTES_PER_DAY, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar,
    years_to_days,
};
pub use local::{Weekday, format_jd_local, jd_to_datetime_utc, weekday_of_jd};
pub use sidereal::{gmst_deg, local_sidereal_time_deg};
pub use utc_time::UtcTime;
