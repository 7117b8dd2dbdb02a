//! Source text ownership and location tracking for the RTL front end.
//!
//! [`SourceDb`] owns every loaded RTL file, [`FileId`] and [`Span`] identify
//! byte ranges within them, and [`ResolvedSpan`] turns those ranges into the
//! 1-based line/column pairs used for property line numbers and diagnostics.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
