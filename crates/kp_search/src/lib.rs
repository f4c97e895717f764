//! KP chart analysis and event-timing search.
//!
//! This crate provides:
//! - The [`Ephemeris`] contract and a mean-motion implementation
//! - Birth and horary chart construction ([`ChartInput`], [`build_chart`])
//! - [`ChartAnalysis`]: significators, classifications, ruling planets and
//!   the pruned dasha tree for one primary/secondary cusp context
//! - The three-stage search: dasha filter, transit filter and
//!   cuspal-interlink scan, with cooperative cancellation and progress
//! - [`spawn_search`] to run a search on a background thread

pub mod analysis;
pub mod chart;
pub mod dasha_filter;
pub mod ephemeris;
pub mod error;
pub mod interlink;
pub mod pipeline;
pub mod progress;
pub(crate) mod search_util;
pub mod search_types;
pub mod transit;
pub mod worker;

pub use analysis::ChartAnalysis;
pub use chart::{ChartInput, ChartKind, build_chart, snapshot_at};
pub use dasha_filter::filter_dasha;
pub use ephemeris::{Ephemeris, MeanMotionEphemeris};
pub use error::{EphemerisError, SearchError};
pub use interlink::{
    HitDeduplicator, InterlinkCriteria, InterlinkMatch, evaluate_interlink, scan_interlink,
};
pub use kp_config::TransitPolicy;
pub use pipeline::{run_search, run_stages};
pub use progress::{CancelToken, ChannelSink, NoProgress, Progress, ProgressSink, Stage};
pub use search_types::{
    InterlinkHit, SearchRange, SearchReport, SearchRequest, SearchStatus, StageOutput,
    TransitWindow,
};
pub use transit::{describe_transit, filter_transits, transit_bodies, transit_qualifies};
pub use worker::{SearchHandle, spawn_search};
