//! Everything derived from one subject chart and one cusp context.

use serde::Serialize;

use kp_config::KpConfig;
use kp_time::{Weekday, weekday_of_jd};
use kp_vedic_base::{
    ChartSnapshot, Classification, Classified, CuspContext, DashaTree, Graha, RulingPlanets,
    Significators, classify_all, compute_significators, rank_ruling_planets,
};

use crate::chart::{ChartInput, build_chart};
use crate::ephemeris::Ephemeris;
use crate::error::SearchError;

/// Subject chart with its significators, classifications, ruling planets
/// and pruned dasha tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartAnalysis {
    pub input: ChartInput,
    pub chart: ChartSnapshot,
    /// Weekday of the local civil date of the subject instant.
    pub weekday: Weekday,
    pub context: CuspContext,
    pub significators: Significators,
    /// Indexed by [`Graha::index`].
    pub classifications: [Classified; 9],
    pub ruling_planets: RulingPlanets,
    pub dasha: DashaTree,
}

impl ChartAnalysis {
    /// Cast the subject chart and analyse it.
    pub fn compute(
        ephemeris: &dyn Ephemeris,
        input: &ChartInput,
        context: CuspContext,
        config: &KpConfig,
    ) -> Result<Self, SearchError> {
        let chart = build_chart(ephemeris, input, config)?;
        Self::from_chart(chart, input, context, config)
    }

    /// Analyse an already cast chart.
    pub fn from_chart(
        chart: ChartSnapshot,
        input: &ChartInput,
        context: CuspContext,
        config: &KpConfig,
    ) -> Result<Self, SearchError> {
        let weekday = weekday_of_jd(input.jd_utc, input.utc_offset_hours)?;
        let significators = compute_significators(&chart);
        let classifications = classify_all(&significators, &context);
        let ruling_planets =
            rank_ruling_planets(&chart, &significators, &classifications, &context, weekday);
        let dasha = DashaTree::build_windowed(
            chart.planet(Graha::Chandra).longitude,
            input.jd_utc,
            input.dasha_window(config),
        );

        tracing::debug!(
            primary = context.primary,
            secondary = %context.secondary,
            ruling_planets = ruling_planets.len(),
            "analysed chart"
        );

        Ok(Self {
            input: *input,
            chart,
            weekday,
            context,
            significators,
            classifications,
            ruling_planets,
            dasha,
        })
    }

    /// Re-run classification and ruling planets for another cusp context.
    ///
    /// The chart, significators and dasha tree do not depend on the context
    /// and are reused.
    pub fn with_context(&self, context: CuspContext) -> Self {
        let classifications = classify_all(&self.significators, &context);
        let ruling_planets = rank_ruling_planets(
            &self.chart,
            &self.significators,
            &classifications,
            &context,
            self.weekday,
        );
        Self {
            context,
            classifications,
            ruling_planets,
            ..self.clone()
        }
    }

    pub fn classified(&self, graha: Graha) -> Classified {
        self.classifications[usize::from(graha.index())]
    }

    pub fn classification(&self, graha: Graha) -> Classification {
        self.classified(graha).classification
    }

    /// Positive or Neutral for the current context.
    pub fn is_favourable(&self, graha: Graha) -> bool {
        self.classification(graha).is_favourable()
    }
}
