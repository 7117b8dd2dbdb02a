//! Hard failures while reading a netlist document.

use std::path::PathBuf;

/// Errors that stop a netlist from being adapted at all.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// The file could not be read.
    #[error("failed to read netlist {path}: {source}")]
    Io {
        /// Netlist path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a JSON netlist document.
    #[error("failed to decode netlist {path}: {source}")]
    Json {
        /// Netlist path.
        path: PathBuf,
        /// Underlying decode error.
        source: serde_json::Error,
    },
}
