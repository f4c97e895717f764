//! Error types for KP Vedic calculations.

use kp_time::TimeError;
use thiserror::Error;

/// Errors from KP base calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// House numbers are 1-based and at most 12.
    #[error("invalid house number {0}, expected 1..=12")]
    InvalidHouse(u8),
    /// Horary serial numbers run from 1 to 2193.
    #[error("horary number {0} out of range 1..=2193")]
    HoraryOutOfRange(u32),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Graha name not recognised in English or Sanskrit.
    #[error("unknown graha: {0}")]
    UnknownGraha(String),
    /// House system code not supported.
    #[error("unknown house system: {0}")]
    UnknownHouseSystem(String),
    /// Error from time conversion.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
