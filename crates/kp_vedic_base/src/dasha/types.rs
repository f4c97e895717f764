//! Core types for the Vimshottari dasha tree.

use serde::Serialize;

use crate::graha::Graha;

use kp_time::{DAYS_PER_YEAR, years_to_days};

/// Display window half-width for horary charts, years.
pub const HORARY_WINDOW_YEARS: f64 = 10.0;

/// Display window length for birth charts, years.
pub const BIRTH_WINDOW_YEARS: f64 = 90.0;

/// 5 hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
    Sookshmadasha,
    Pranadasha,
}

pub const ALL_DASHA_LEVELS: [DashaLevel; 5] = [
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
    DashaLevel::Sookshmadasha,
    DashaLevel::Pranadasha,
];

impl DashaLevel {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
            Self::Pranadasha => "Pranadasha",
        }
    }

    /// Conventional abbreviation (MD, AD, PD, SD, PrD).
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Mahadasha => "MD",
            Self::Antardasha => "AD",
            Self::Pratyantardasha => "PD",
            Self::Sookshmadasha => "SD",
            Self::Pranadasha => "PrD",
        }
    }

    /// 0 for Mahadasha .. 4 for Pranadasha.
    pub const fn depth(self) -> usize {
        self as usize
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => Some(Self::Sookshmadasha),
            Self::Sookshmadasha => Some(Self::Pranadasha),
            Self::Pranadasha => None,
        }
    }
}

/// One period in the dasha tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaNode {
    pub lord: Graha,
    pub level: DashaLevel,
    /// JD UTC, inclusive.
    pub start_jd: f64,
    /// JD UTC, exclusive.
    pub end_jd: f64,
    pub children: Vec<DashaNode>,
}

impl DashaNode {
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    pub fn duration_years(&self) -> f64 {
        self.duration_days() / DAYS_PER_YEAR
    }

    /// Whether `jd` falls within `[start_jd, end_jd)`.
    pub fn contains(&self, jd: f64) -> bool {
        jd >= self.start_jd && jd < self.end_jd
    }

    /// Whether this period shares any time with `[start_jd, end_jd)`.
    pub fn overlaps(&self, start_jd: f64, end_jd: f64) -> bool {
        self.start_jd < end_jd && self.end_jd > start_jd
    }
}

/// Date range a dasha tree is pruned to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaWindow {
    pub start_jd: f64,
    pub end_jd: f64,
}

impl DashaWindow {
    pub fn new(start_jd: f64, end_jd: f64) -> Self {
        Self { start_jd, end_jd }
    }

    /// `[query - years, query + years]` around a horary instant.
    pub fn horary(query_jd: f64, years: f64) -> Self {
        let half = years_to_days(years);
        Self::new(query_jd - half, query_jd + half)
    }

    /// `[birth, birth + years]` for a birth chart.
    pub fn birth(birth_jd: f64, years: f64) -> Self {
        Self::new(birth_jd, birth_jd + years_to_days(years))
    }

    pub fn overlaps(&self, node: &DashaNode) -> bool {
        node.overlaps(self.start_jd, self.end_jd)
    }
}

/// A Pranadasha leaf with its four ancestor lords.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaSpan {
    /// MD, AD, PD, SD and PrD lords.
    pub lords: [Graha; 5],
    pub start_jd: f64,
    pub end_jd: f64,
}

impl DashaSpan {
    pub fn maha(&self) -> Graha {
        self.lords[0]
    }

    pub fn prana(&self) -> Graha {
        self.lords[4]
    }

    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    pub fn contains(&self, jd: f64) -> bool {
        jd >= self.start_jd && jd < self.end_jd
    }

    /// Lords joined with `-`, e.g. `Venus-Sun-Moon-Mars-Rahu`.
    pub fn label(&self) -> String {
        self.lords
            .iter()
            .map(|g| g.english_name())
            .collect::<Vec<_>>()
            .join("-")
    }
}
