//! Source locations resolved to 1-based line/column coordinates.

use std::fmt;
use std::path::PathBuf;

/// A [`Span`](crate::Span) resolved for display. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Path of the source file.
    pub file_path: PathBuf,
    /// First line of the span.
    pub start_line: u32,
    /// First column of the span.
    pub start_col: u32,
    /// Last line of the span.
    pub end_line: u32,
    /// Last column of the span.
    pub end_col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_col
        )
    }
}
