//! Configuration for KP chart construction and the temporal search.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the standard KP setup: Placidus cusps, KP ayanamsha less 0.1°, a ±10
//! year horary dasha window and a 90 year birth window.
//!
//! ```toml
//! [ayanamsha]
//! correction_deg = 0.1
//!
//! [chart]
//! house_system = "P"
//!
//! [search]
//! interlink_step_minutes = 2.0
//! transit_policy = "any"
//! ```

pub mod error;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use kp_vedic_base::{
    BIRTH_WINDOW_YEARS, HORARY_WINDOW_YEARS, HouseSystem, KP_AYANAMSHA_CORRECTION_DEG,
};

pub use error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KpConfig {
    pub ayanamsha: AyanamshaConfig,
    pub chart: ChartConfig,
    pub dasha: DashaConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AyanamshaConfig {
    /// Subtracted from the published KP ayanamsha.
    pub correction_deg: f64,
}

impl Default for AyanamshaConfig {
    fn default() -> Self {
        Self {
            correction_deg: KP_AYANAMSHA_CORRECTION_DEG,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub house_system: HouseSystem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashaConfig {
    /// Half-width of the window around a horary query instant.
    pub horary_window_years: f64,
    /// Length of the window after a birth instant.
    pub birth_window_years: f64,
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self {
            horary_window_years: HORARY_WINDOW_YEARS,
            birth_window_years: BIRTH_WINDOW_YEARS,
        }
    }
}

/// How the transit filter judges one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitPolicy {
    /// Every star and sub lord of every tested body must be Positive or Neutral.
    #[default]
    All,
    /// At least one of those lords must be Positive or Neutral.
    Any,
}

impl TransitPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for TransitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "and" => Ok(Self::All),
            "any" | "or" => Ok(Self::Any),
            other => Err(ConfigError::Invalid {
                field: "search.transit_policy",
                reason: format!("unknown policy '{other}' (expected all or any)"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub transit_step_days: f64,
    pub interlink_step_minutes: f64,
    pub transit_policy: TransitPolicy,
    /// Jupiter joins the transit test when the search range is longer.
    pub jupiter_threshold_days: f64,
    /// Saturn joins the transit test when the search range is longer.
    pub saturn_threshold_days: f64,
    /// Report progress every this many scanned instants.
    pub progress_every: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transit_step_days: 1.0,
            interlink_step_minutes: 2.0,
            transit_policy: TransitPolicy::All,
            jupiter_threshold_days: 90.0,
            saturn_threshold_days: 547.0,
            progress_every: 720,
        }
    }
}

impl KpConfig {
    /// Read and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self.ayanamsha.correction_deg;
        if !c.is_finite() || c.abs() > 5.0 {
            return Err(invalid("ayanamsha.correction_deg", format!("{c} is outside [-5, 5]")));
        }
        positive("dasha.horary_window_years", self.dasha.horary_window_years)?;
        positive("dasha.birth_window_years", self.dasha.birth_window_years)?;

        let s = &self.search;
        positive("search.transit_step_days", s.transit_step_days)?;
        positive("search.interlink_step_minutes", s.interlink_step_minutes)?;
        positive("search.jupiter_threshold_days", s.jupiter_threshold_days)?;
        positive("search.saturn_threshold_days", s.saturn_threshold_days)?;
        if s.progress_every == 0 {
            return Err(invalid("search.progress_every", "must be at least 1".into()));
        }
        if s.interlink_step_minutes > s.transit_step_days * 1440.0 {
            return Err(invalid(
                "search.interlink_step_minutes",
                "must not exceed the transit step".into(),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be a positive number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = KpConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, KpConfig::default());
        assert_eq!(cfg.chart.house_system, HouseSystem::Placidus);
        assert_eq!(cfg.search.transit_policy, TransitPolicy::All);
        assert!((cfg.ayanamsha.correction_deg - 0.1).abs() < 1e-12);
        assert_eq!(cfg.dasha.birth_window_years, 90.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = KpConfig::from_toml_str(
            r#"
            [chart]
            house_system = "E"

            [search]
            transit_policy = "any"
            interlink_step_minutes = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.chart.house_system, HouseSystem::Equal);
        assert_eq!(cfg.search.transit_policy, TransitPolicy::Any);
        assert_eq!(cfg.search.interlink_step_minutes, 5.0);
        assert_eq!(cfg.search.transit_step_days, 1.0);
        assert_eq!(cfg.dasha, DashaConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = KpConfig::from_toml_str("[chart]\nhouses = \"P\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_house_system_is_rejected() {
        assert!(KpConfig::from_toml_str("[chart]\nhouse_system = \"K\"\n").is_err());
    }

    #[test]
    fn non_positive_step_is_invalid() {
        let err = KpConfig::from_toml_str("[search]\ntransit_step_days = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "search.transit_step_days",
                ..
            }
        ));
    }

    #[test]
    fn interlink_step_larger_than_transit_step_is_invalid() {
        let err = KpConfig::from_toml_str(
            "[search]\ntransit_step_days = 0.01\ninterlink_step_minutes = 30.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn policy_parses_aliases() {
        assert_eq!("AND".parse::<TransitPolicy>().unwrap(), TransitPolicy::All);
        assert_eq!("or".parse::<TransitPolicy>().unwrap(), TransitPolicy::Any);
        assert!("most".parse::<TransitPolicy>().is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = KpConfig::default();
        cfg.search.transit_policy = TransitPolicy::Any;
        cfg.chart.house_system = HouseSystem::Porphyry;
        let text = toml::to_string(&cfg).unwrap();
        assert_eq!(KpConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = KpConfig::load("/nonexistent/kp.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
