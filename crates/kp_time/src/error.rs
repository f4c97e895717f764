//! Error types for calendar and time conversions.

use thiserror::Error;

/// Errors from calendar parsing, validation, or formatting.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar field is outside its valid range.
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
    /// The input string does not match `YYYY-MM-DDThh:mm:ss[Z]`.
    #[error("cannot parse date/time '{0}': expected YYYY-MM-DDThh:mm:ssZ")]
    Parse(String),
    /// UTC offset outside ±14 hours.
    #[error("UTC offset out of range: {0} hours")]
    InvalidOffset(f64),
    /// JD cannot be represented as a calendar timestamp.
    #[error("Julian date {0} is outside the representable range")]
    OutOfRange(f64),
}
