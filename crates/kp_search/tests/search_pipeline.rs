//! End-to-end searches against the mean-motion ephemeris.

use std::sync::Arc;

use kp_config::{KpConfig, TransitPolicy};
use kp_search::{
    CancelToken, ChartAnalysis, ChartInput, MeanMotionEphemeris, NoProgress, Progress, SearchRange,
    SearchRequest, SearchStatus, Stage, run_search, spawn_search,
};
use kp_time::{J2000_JD, UtcTime};
use kp_vedic_base::{CuspContext, GeoLocation};

fn chennai() -> GeoLocation {
    GeoLocation::new(13.08, 80.27).unwrap()
}

fn request(days: f64) -> SearchRequest {
    let birth: UtcTime = "1990-05-17T03:45:00Z".parse().unwrap();
    let input = ChartInput::birth(birth.to_jd(), chennai(), 5.5);
    let start = J2000_JD + 8000.0;
    SearchRequest {
        input,
        context: CuspContext::new(7, &[2, 11]).unwrap(),
        range: SearchRange::new(start, start + days).unwrap(),
    }
}

fn relaxed_config() -> KpConfig {
    let mut config = KpConfig::default();
    config.search.transit_policy = TransitPolicy::Any;
    config
}

#[test]
fn search_results_are_nested_and_ordered() {
    let req = request(3.0);
    let config = relaxed_config();
    let report = run_search(
        &MeanMotionEphemeris,
        &req,
        &config,
        &CancelToken::new(),
        &mut NoProgress,
    )
    .unwrap();
    assert_eq!(report.status, SearchStatus::Completed);

    let analysis =
        ChartAnalysis::compute(&MeanMotionEphemeris, &req.input, req.context, &config).unwrap();
    for span in &report.spans {
        assert!(span.lords.iter().all(|&g| analysis.is_favourable(g)), "{}", span.label());
        assert!(span.start_jd < req.range.end_jd && span.end_jd > req.range.start_jd);
    }
    for w in &report.windows {
        assert!(w.start_jd >= req.range.start_jd && w.end_jd <= req.range.end_jd);
        assert!(w.start_jd >= w.dasha.start_jd && w.end_jd <= w.dasha.end_jd + 1e-9);
        assert!(report.spans.contains(&w.dasha));
    }
    for pair in report.hits.windows(2) {
        assert!(pair[0].timestamp_jd < pair[1].timestamp_jd);
    }
    for hit in &report.hits {
        assert!(
            report
                .windows
                .iter()
                .any(|w| hit.timestamp_jd >= w.start_jd && hit.timestamp_jd < w.end_jd)
        );
        assert!(analysis.ruling_planets.contains(hit.linking_planet));
    }
}

#[test]
fn horary_search_runs() {
    let mut req = request(2.0);
    req.input = ChartInput::horary(249, J2000_JD + 7999.5, chennai(), 5.5).unwrap();
    let report = run_search(
        &MeanMotionEphemeris,
        &req,
        &relaxed_config(),
        &CancelToken::new(),
        &mut NoProgress,
    )
    .unwrap();
    assert_eq!(report.status, SearchStatus::Completed);
}

#[test]
fn cancelled_before_start_is_reported_not_failed() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let report = run_search(
        &MeanMotionEphemeris,
        &request(3.0),
        &KpConfig::default(),
        &cancel,
        &mut NoProgress,
    )
    .unwrap();
    assert_eq!(report.status, SearchStatus::Cancelled { stage: Stage::Dasha });
    assert!(report.is_cancelled());
    assert!(report.hits.is_empty());
}

#[test]
fn progress_reaches_every_stage() {
    let mut stages = Vec::new();
    let mut sink = |p: Progress| {
        if stages.last() != Some(&p.stage) {
            stages.push(p.stage);
        }
    };
    run_search(
        &MeanMotionEphemeris,
        &request(1.0),
        &relaxed_config(),
        &CancelToken::new(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(stages, vec![Stage::Dasha, Stage::Transit, Stage::Interlink]);
}

#[test]
fn worker_streams_progress_and_joins() {
    let handle = spawn_search(
        Arc::new(MeanMotionEphemeris),
        request(1.0),
        relaxed_config(),
    )
    .unwrap();
    // Ends when the worker drops its sender.
    let samples = handle.progress().iter().count();
    let report = handle.join().unwrap();
    assert_eq!(report.status, SearchStatus::Completed);
    assert!(samples >= 3);
}

#[test]
fn worker_cancellation_ends_cleanly() {
    let handle = spawn_search(
        Arc::new(MeanMotionEphemeris),
        request(30.0),
        KpConfig::default(),
    )
    .unwrap();
    handle.cancel();
    let report = handle.join().unwrap();
    // The worker may already have finished; either way this is not an error.
    assert!(matches!(
        report.status,
        SearchStatus::Completed | SearchStatus::Cancelled { .. }
    ));
}

#[test]
fn invalid_location_is_an_error() {
    let mut req = request(1.0);
    req.input.location = GeoLocation {
        latitude_deg: 95.0,
        longitude_deg: 0.0,
    };
    let res = run_search(
        &MeanMotionEphemeris,
        &req,
        &KpConfig::default(),
        &CancelToken::new(),
        &mut NoProgress,
    );
    assert!(res.is_err());
}
