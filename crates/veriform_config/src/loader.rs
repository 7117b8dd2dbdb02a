//! Settings file discovery, parsing and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;
use tracing::debug;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "veriform.toml";

const VHDL_STANDARDS: &[&str] = &["87", "93", "02", "08", "19"];

/// Finds and loads the settings for a run.
///
/// An explicit path must exist. Without one, `<dir>/veriform.toml` is used if
/// present, and the built-in defaults otherwise.
pub fn discover_config(explicit: Option<&Path>, dir: &Path) -> Result<ProjectConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        load_config(&candidate)
    } else {
        debug!(dir = %dir.display(), "no {CONFIG_FILE_NAME}, using defaults");
        Ok(ProjectConfig::default())
    }
}

/// Reads, parses and validates a settings file.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading configuration");
    load_config_from_str(&content)
}

/// Parses and validates settings from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.proof.depth == 0 {
        return Err(ConfigError::ValidationError(
            "proof.depth must be at least 1".to_string(),
        ));
    }
    if config.proof.engine.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "proof.engine must not be empty".to_string(),
        ));
    }
    if !VHDL_STANDARDS.contains(&config.proof.vhdl_std.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "proof.vhdl_std '{}' is not one of {}",
            config.proof.vhdl_std,
            VHDL_STANDARDS.join(", ")
        )));
    }
    // An empty module prefix would make the wrapper collide with the design.
    if config.output.module_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "output.module_prefix must not be empty".to_string(),
        ));
    }
    for (key, value) in [
        ("output.wrapper_prefix", &config.output.wrapper_prefix),
        ("output.module_prefix", &config.output.module_prefix),
    ] {
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::ValidationError(format!(
                "{key} '{value}' may only contain letters, digits and '_'"
            )));
        }
    }
    Ok(())
}
