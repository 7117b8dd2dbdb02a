//! Atomic, change-aware writes of generated artifacts.
//!
//! Text is written to a uniquely named hidden sibling (`.<name>.XXXXXX.tmp`)
//! and renamed over the target, so readers never observe a partial file and
//! concurrent writers never share a temporary. A target whose content
//! hash already matches is left alone, which keeps timestamps stable for
//! downstream tools across repeated runs.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use veriform_common::ContentHash;

/// Errors from writing an artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// An I/O error occurred while creating, writing or renaming the file.
    #[error("failed to write artifact {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The target path has no file name component.
    #[error("artifact path {path} has no file name")]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
    },
}

/// What [`write_artifact`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or its content replaced.
    Written,
    /// The file already held identical content.
    Unchanged,
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub fn write_artifact(path: &Path, contents: &str) -> Result<WriteOutcome, ArtifactError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ArtifactError::Io { path, source }
    };

    let new_hash = ContentHash::from_bytes(contents.as_bytes());
    if ContentHash::of_file(path).map_err(io_err(path))? == Some(new_hash) {
        debug!(path = %path.display(), "artifact unchanged");
        return Ok(WriteOutcome::Unchanged);
    }

    let file_name = path.file_name().ok_or_else(|| ArtifactError::InvalidPath {
        path: path.to_path_buf(),
    })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(io_err(dir))?;

    let mut prefix = OsString::from(".");
    prefix.push(file_name);
    prefix.push(".");
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_err(dir))?;
    tmp.write_all(contents.as_bytes()).map_err(io_err(tmp.path()))?;
    // A failed persist drops the temporary, which deletes it.
    tmp.persist(path).map_err(|e| ArtifactError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    debug!(path = %path.display(), hash = %new_hash, "artifact written");
    Ok(WriteOutcome::Written)
}
