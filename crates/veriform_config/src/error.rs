//! Error types for configuration loading and validation.

use std::path::PathBuf;

/// Errors raised while reading or validating `veriform.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// Path of the settings file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is out of range or otherwise unusable.
    #[error("validation error: {0}")]
    ValidationError(String),
}
