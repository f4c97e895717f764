//! Orchestration of the three search stages.

use kp_config::KpConfig;
use kp_vedic_base::ChartSnapshot;

use crate::analysis::ChartAnalysis;
use crate::chart::snapshot_at;
use crate::dasha_filter::filter_dasha;
use crate::ephemeris::Ephemeris;
use crate::error::SearchError;
use crate::interlink::{InterlinkCriteria, scan_interlink};
use crate::progress::{CancelToken, ProgressSink, Stage};
use crate::search_types::{SearchRange, SearchReport, SearchRequest, SearchStatus};
use crate::transit::filter_transits;

/// Cast the subject chart for `request` and run all three stages.
pub fn run_search(
    ephemeris: &dyn Ephemeris,
    request: &SearchRequest,
    config: &KpConfig,
    cancel: &CancelToken,
    progress: &mut dyn ProgressSink,
) -> Result<SearchReport, SearchError> {
    let analysis = ChartAnalysis::compute(ephemeris, &request.input, request.context, config)?;
    let location = request.input.location;
    run_stages(
        &analysis,
        &request.range,
        config,
        |jd| snapshot_at(ephemeris, jd, &location, config),
        cancel,
        progress,
    )
}

/// Run the stages against an analysed subject chart.
///
/// `chart_at` supplies the sky at each scanned instant, which lets callers
/// substitute recorded or synthetic charts for an ephemeris.
pub fn run_stages<F>(
    analysis: &ChartAnalysis,
    range: &SearchRange,
    config: &KpConfig,
    mut chart_at: F,
    cancel: &CancelToken,
    progress: &mut dyn ProgressSink,
) -> Result<SearchReport, SearchError>
where
    F: FnMut(f64) -> Result<ChartSnapshot, SearchError>,
{
    let search = &config.search;
    tracing::info!(
        start_jd = range.start_jd,
        end_jd = range.end_jd,
        primary = analysis.context.primary,
        secondary = %analysis.context.secondary,
        "search started"
    );

    let mut report = SearchReport {
        status: SearchStatus::Completed,
        range: *range,
        spans: Vec::new(),
        windows: Vec::new(),
        hits: Vec::new(),
    };

    let spans = filter_dasha(
        &analysis.dasha,
        &analysis.classifications,
        range,
        cancel,
        progress,
        search.progress_every,
    );
    report.spans = spans.items;
    if spans.cancelled {
        return Ok(cancelled(report, Stage::Dasha));
    }

    let windows = filter_transits(
        &report.spans,
        range,
        &analysis.classifications,
        search,
        &mut chart_at,
        cancel,
        progress,
    )?;
    report.windows = windows.items;
    if windows.cancelled {
        return Ok(cancelled(report, Stage::Transit));
    }

    let criteria = InterlinkCriteria::from_analysis(analysis);
    let hits = scan_interlink(
        &report.windows,
        &criteria,
        search,
        analysis.input.utc_offset_hours,
        &mut chart_at,
        cancel,
        progress,
    )?;
    report.hits = hits.items;
    if hits.cancelled {
        return Ok(cancelled(report, Stage::Interlink));
    }

    tracing::info!(
        spans = report.spans.len(),
        windows = report.windows.len(),
        hits = report.hits.len(),
        "search finished"
    );
    Ok(report)
}

fn cancelled(mut report: SearchReport, stage: Stage) -> SearchReport {
    tracing::info!(%stage, "search cancelled");
    report.status = SearchStatus::Cancelled { stage };
    report
}
