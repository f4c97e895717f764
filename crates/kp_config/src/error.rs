//! Error types for configuration loading.

use std::path::PathBuf;

/// Errors from reading, parsing or validating a config file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
