//! Stage 2: day-by-day transit filter inside each favourable dasha span.
//!
//! At every step the current sky is cast and the star and sub lords of the
//! Sun and Moon (plus Jupiter and Saturn for long searches) are checked
//! against the subject chart's classifications. Consecutive qualifying
//! steps merge into one [`TransitWindow`].

use kp_config::{SearchConfig, TransitPolicy};
use kp_vedic_base::{ChartSnapshot, Classified, DashaSpan, Graha};

use crate::error::SearchError;
use crate::progress::{CancelToken, ProgressSink, Stage, StageMeter};
use crate::search_types::{SearchRange, StageOutput, TransitWindow};
use crate::search_util::{instants, step_count};

/// Bodies tested for a search range of this length.
pub fn transit_bodies(range: &SearchRange, search: &SearchConfig) -> Vec<Graha> {
    let days = range.duration_days();
    let mut bodies = vec![Graha::Surya, Graha::Chandra];
    if days > search.jupiter_threshold_days {
        bodies.push(Graha::Guru);
    }
    if days > search.saturn_threshold_days {
        bodies.push(Graha::Shani);
    }
    bodies
}

/// Whether the transiting `bodies` satisfy `policy` at `chart`.
pub fn transit_qualifies(
    chart: &ChartSnapshot,
    bodies: &[Graha],
    classifications: &[Classified; 9],
    policy: TransitPolicy,
) -> bool {
    let favourable = |g: Graha| {
        classifications[usize::from(g.index())]
            .classification
            .is_favourable()
    };
    let mut lords = bodies.iter().flat_map(|&b| {
        let pos = chart.planet(b);
        [pos.star_lord, pos.sub_lord]
    });
    match policy {
        TransitPolicy::All => lords.all(favourable),
        TransitPolicy::Any => lords.any(favourable),
    }
}

/// `Sun star Venus sub Moon; Moon star Rahu sub Saturn`.
pub fn describe_transit(chart: &ChartSnapshot, bodies: &[Graha]) -> String {
    bodies
        .iter()
        .map(|&b| {
            let pos = chart.planet(b);
            format!("{b} star {} sub {}", pos.star_lord, pos.sub_lord)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Scan every span at `search.transit_step_days` and merge qualifying steps.
///
/// `chart_at` casts the sky at an instant.
pub fn filter_transits<F>(
    spans: &[DashaSpan],
    range: &SearchRange,
    classifications: &[Classified; 9],
    search: &SearchConfig,
    mut chart_at: F,
    cancel: &CancelToken,
    progress: &mut dyn ProgressSink,
) -> Result<StageOutput<TransitWindow>, SearchError>
where
    F: FnMut(f64) -> Result<ChartSnapshot, SearchError>,
{
    let bodies = transit_bodies(range, search);
    let step = search.transit_step_days;
    let policy = search.transit_policy;

    let clipped: Vec<(DashaSpan, f64, f64)> = spans
        .iter()
        .filter_map(|s| range.clip(s.start_jd, s.end_jd).map(|(a, b)| (*s, a, b)))
        .collect();
    let total = clipped.iter().map(|&(_, a, b)| step_count(a, b, step)).sum();
    let mut meter = StageMeter::new(Stage::Transit, total, search.progress_every);

    let mut windows = Vec::new();
    let mut cancelled = false;
    'spans: for (span, start, end) in clipped {
        let mut open: Option<TransitWindow> = None;
        for t in instants(start, end, step) {
            if cancel.is_cancelled() {
                cancelled = true;
                windows.extend(open.take());
                break 'spans;
            }
            let chart = chart_at(t)?;
            let step_end = (t + step).min(end);
            if transit_qualifies(&chart, &bodies, classifications, policy) {
                match open.as_mut() {
                    Some(w) => w.end_jd = step_end,
                    None => {
                        open = Some(TransitWindow {
                            start_jd: t,
                            end_jd: step_end,
                            dasha: span,
                            policy,
                            bodies: bodies.clone(),
                            detail: describe_transit(&chart, &bodies),
                        });
                    }
                }
            } else {
                windows.extend(open.take());
            }
            meter.tick(progress);
        }
        windows.extend(open);
    }
    meter.finish(progress);

    tracing::debug!(
        windows = windows.len(),
        bodies = ?bodies,
        %policy,
        cancelled,
        "transit filter done"
    );
    Ok(StageOutput::new(windows, cancelled))
}
