//! Stage 3: minute-level cuspal-interlink scan inside transit windows.
//!
//! At each instant the primary cusp's current sub lord must be a strong
//! ruling planet, its star lord a (relaxed) ruling planet, and that star
//! lord must link to the current sub lord of at least one secondary cusp.
//! Repeated hits with the same signature on consecutive instants collapse
//! into one.

use kp_config::SearchConfig;
use kp_time::{MINUTES_PER_DAY, format_jd_local};
use kp_vedic_base::{
    ChartSnapshot, Classification, Classified, CuspContext, Graha, RpTier, RulingPlanets,
};

use crate::analysis::ChartAnalysis;
use crate::error::SearchError;
use crate::progress::{CancelToken, ProgressSink, Stage, StageMeter};
use crate::search_types::{InterlinkHit, StageOutput, TransitWindow};
use crate::search_util::{instants, step_count};

/// Weakest tier the primary cusp's sub lord may hold.
pub const PC_SUB_LORD_MIN_TIER: RpTier = RpTier::SecondStrong;

/// The subject-chart facts an interlink is judged against.
#[derive(Debug, Clone, Copy)]
pub struct InterlinkCriteria<'a> {
    pub context: &'a CuspContext,
    pub classifications: &'a [Classified; 9],
    pub ruling_planets: &'a RulingPlanets,
}

impl<'a> InterlinkCriteria<'a> {
    pub fn from_analysis(analysis: &'a ChartAnalysis) -> Self {
        Self {
            context: &analysis.context,
            classifications: &analysis.classifications,
            ruling_planets: &analysis.ruling_planets,
        }
    }

    fn classification(&self, graha: Graha) -> Classification {
        self.classifications[usize::from(graha.index())].classification
    }

    /// Positive and ranked at least [`PC_SUB_LORD_MIN_TIER`].
    fn strict(&self, graha: Graha) -> bool {
        self.classification(graha) == Classification::Positive
            && self
                .ruling_planets
                .tier_of(graha)
                .is_some_and(|t| t.at_least(PC_SUB_LORD_MIN_TIER))
    }

    /// Any ruling planet that is Positive or Neutral.
    fn relaxed(&self, graha: Graha) -> bool {
        self.ruling_planets.contains(graha) && self.classification(graha).is_favourable()
    }
}

/// A qualifying instant before de-duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterlinkMatch {
    pub pc_sub_lord: Graha,
    pub linking_planet: Graha,
    /// One description per satisfied secondary cusp, sorted.
    pub links: Vec<String>,
}

impl InterlinkMatch {
    pub fn description(&self) -> String {
        format!(
            "cusp sub lord {} via star lord {}: {}",
            self.pc_sub_lord,
            self.linking_planet,
            self.links.join("; ")
        )
    }
}

/// Test one instant's chart.
pub fn evaluate_interlink(
    chart: &ChartSnapshot,
    criteria: &InterlinkCriteria<'_>,
) -> Option<InterlinkMatch> {
    let pc = criteria.context.primary;
    let pc_sub = chart.cusp(pc).position.sub_lord;
    if !criteria.strict(pc_sub) {
        return None;
    }
    let star = chart.planet(pc_sub).star_lord;
    if !criteria.relaxed(star) {
        return None;
    }

    let mut links: Vec<String> = criteria
        .context
        .secondary
        .iter()
        .filter_map(|sc| link_to_cusp(chart, criteria, star, sc))
        .collect();
    if links.is_empty() {
        return None;
    }
    links.sort();
    Some(InterlinkMatch {
        pc_sub_lord: pc_sub,
        linking_planet: star,
        links,
    })
}

/// How `star` reaches the sub lord of cusp `sc`, if it does.
fn link_to_cusp(
    chart: &ChartSnapshot,
    criteria: &InterlinkCriteria<'_>,
    star: Graha,
    sc: u8,
) -> Option<String> {
    let sc_sub = chart.cusp(sc).position.sub_lord;
    if sc_sub == star {
        return Some(format!("cusp {sc} sub lord {sc_sub}"));
    }
    let sub_pos = chart.planet(sc_sub);
    // A node links through its dispositors only when both are favourable.
    let dispositors = [("sign", sub_pos.sign_lord), ("star", sub_pos.star_lord)];
    if sc_sub.is_node()
        && dispositors
            .iter()
            .all(|&(_, lord)| criteria.classification(lord).is_favourable())
    {
        if let Some((role, lord)) = dispositors.into_iter().find(|&(_, lord)| lord == star) {
            return Some(format!("cusp {sc} sub lord {sc_sub} through its {role} lord {lord}"));
        }
    }
    if chart.planet(star).star_lord == sub_pos.star_lord {
        return Some(format!(
            "cusp {sc} sub lord {sc_sub} shares star lord {}",
            sub_pos.star_lord
        ));
    }
    None
}

/// Suppresses a hit while its signature repeats on consecutive instants.
#[derive(Debug, Clone, Default)]
pub struct HitDeduplicator {
    last: Option<(Graha, Vec<String>)>,
}

impl HitDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the match at the next instant; true if it should be emitted.
    ///
    /// `None` (no hit) clears the state so a later identical signature is
    /// reported again.
    pub fn observe(&mut self, found: Option<&InterlinkMatch>) -> bool {
        let Some(m) = found else {
            self.last = None;
            return false;
        };
        let repeat = self
            .last
            .as_ref()
            .is_some_and(|(sub, links)| *sub == m.pc_sub_lord && *links == m.links);
        if !repeat {
            self.last = Some((m.pc_sub_lord, m.links.clone()));
        }
        !repeat
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Scan every window at `search.interlink_step_minutes`.
///
/// Windows must be in date order. De-duplication carries across windows
/// that touch and resets across gaps.
pub fn scan_interlink<F>(
    windows: &[TransitWindow],
    criteria: &InterlinkCriteria<'_>,
    search: &SearchConfig,
    utc_offset_hours: f64,
    mut chart_at: F,
    cancel: &CancelToken,
    progress: &mut dyn ProgressSink,
) -> Result<StageOutput<InterlinkHit>, SearchError>
where
    F: FnMut(f64) -> Result<ChartSnapshot, SearchError>,
{
    let step = search.interlink_step_minutes / MINUTES_PER_DAY;
    let total = windows
        .iter()
        .map(|w| step_count(w.start_jd, w.end_jd, step))
        .sum();
    let mut meter = StageMeter::new(Stage::Interlink, total, search.progress_every);

    let mut dedup = HitDeduplicator::new();
    let mut hits = Vec::new();
    let mut cancelled = false;
    let mut previous_end: Option<f64> = None;

    'windows: for window in windows {
        if previous_end.is_none_or(|end| window.start_jd > end + 1e-9) {
            dedup.reset();
        }
        previous_end = Some(window.end_jd);

        for t in instants(window.start_jd, window.end_jd, step) {
            if cancel.is_cancelled() {
                cancelled = true;
                break 'windows;
            }
            let chart = chart_at(t)?;
            let found = evaluate_interlink(&chart, criteria);
            let emit = dedup.observe(found.as_ref());
            if let Some(m) = found.filter(|_| emit) {
                let hit = InterlinkHit {
                    timestamp_jd: t,
                    local_time: format_jd_local(t, utc_offset_hours)?,
                    linking_planet: m.linking_planet,
                    pc_sub_lord: m.pc_sub_lord,
                    link_description: m.description(),
                    dasha_lords: window.dasha.lords,
                };
                tracing::trace!(jd = t, hit = %hit.link_description, "interlink hit");
                hits.push(hit);
            }
            meter.tick(progress);
        }
    }
    meter.finish(progress);

    tracing::debug!(hits = hits.len(), cancelled, "interlink scan done");
    Ok(StageOutput::new(hits, cancelled))
}
