//! Loading and validation of the optional `veriform.toml` settings file.
//!
//! Every setting has a default, so a missing file behaves exactly like an
//! empty one. Use [`discover_config`] from command-line front ends and
//! [`load_config_from_str`] from tests.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{discover_config, load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::{OutputSettings, ProjectConfig, ProofSettings};
