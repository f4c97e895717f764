//! Inputs and outputs of the three-stage search.

use serde::Serialize;

use kp_config::TransitPolicy;
use kp_vedic_base::{CuspContext, DashaSpan, Graha};

use crate::chart::ChartInput;
use crate::error::SearchError;
use crate::progress::Stage;

/// Half-open search range `[start_jd, end_jd)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchRange {
    pub start_jd: f64,
    pub end_jd: f64,
}

impl SearchRange {
    pub fn new(start_jd: f64, end_jd: f64) -> Result<Self, SearchError> {
        if !start_jd.is_finite() || !end_jd.is_finite() {
            return Err(SearchError::InvalidRange("bounds must be finite".into()));
        }
        if end_jd <= start_jd {
            return Err(SearchError::InvalidRange(format!(
                "end {end_jd} is not after start {start_jd}"
            )));
        }
        Ok(Self { start_jd, end_jd })
    }

    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Intersection with `[start_jd, end_jd)`, if non-empty.
    pub fn clip(&self, start_jd: f64, end_jd: f64) -> Option<(f64, f64)> {
        let start = start_jd.max(self.start_jd);
        let end = end_jd.min(self.end_jd);
        (start < end).then_some((start, end))
    }
}

/// A full search job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchRequest {
    pub input: ChartInput,
    pub context: CuspContext,
    pub range: SearchRange,
}

/// Items produced by one stage, and whether it stopped early.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput<T> {
    pub items: Vec<T>,
    pub cancelled: bool,
}

impl<T> StageOutput<T> {
    pub(crate) fn new(items: Vec<T>, cancelled: bool) -> Self {
        Self { items, cancelled }
    }
}

/// Contiguous stretch inside one dasha span where transits qualify.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitWindow {
    pub start_jd: f64,
    pub end_jd: f64,
    pub dasha: DashaSpan,
    pub policy: TransitPolicy,
    /// Bodies whose star and sub lords were tested.
    pub bodies: Vec<Graha>,
    /// Lords of the tested bodies when the window opened.
    pub detail: String,
}

impl TransitWindow {
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }
}

/// One cuspal-interlink timing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterlinkHit {
    pub timestamp_jd: f64,
    /// `timestamp_jd` in the subject's local civil time.
    pub local_time: String,
    /// Star lord of the primary cusp's sub lord.
    pub linking_planet: Graha,
    pub pc_sub_lord: Graha,
    pub link_description: String,
    /// MD, AD, PD, SD and PrD lords running at the hit.
    pub dasha_lords: [Graha; 5],
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    Completed,
    /// Stopped at the caller's request during `stage`; results so far are kept.
    Cancelled { stage: Stage },
}

/// Result of a search. Empty vectors are a valid outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub status: SearchStatus,
    pub range: SearchRange,
    pub spans: Vec<DashaSpan>,
    pub windows: Vec<TransitWindow>,
    pub hits: Vec<InterlinkHit>,
}

impl SearchReport {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, SearchStatus::Cancelled { .. })
    }
}
