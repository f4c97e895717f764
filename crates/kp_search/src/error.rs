//! Error types for chart construction and the temporal search.

use kp_time::TimeError;
use kp_vedic_base::{Graha, VedicError};

/// Failures reported by an [`crate::Ephemeris`] backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum EphemerisError {
    #[error("{0} is not provided by this ephemeris")]
    UnsupportedBody(Graha),
    #[error("Julian date {0} is outside the ephemeris range")]
    OutOfRange(f64),
    #[error("cusp computation failed: {0}")]
    Cusps(#[from] VedicError),
}

/// Errors from chart analysis or the search pipeline.
///
/// Cancellation and empty results are not errors; see
/// [`crate::SearchStatus`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    #[error("ephemeris: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Vedic(#[from] VedicError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error("invalid search range: {0}")]
    InvalidRange(String),
    #[error("failed to start search worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("search worker panicked")]
    WorkerPanicked,
}
