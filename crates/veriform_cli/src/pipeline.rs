//! Shared pipeline helpers for CLI commands.
//!
//! Loading a design's sources, classifying hard failures, and rendering the
//! diagnostics a design produced.

use std::io;
use std::path::{Path, PathBuf};

use veriform_diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticRenderer, DiagnosticSink, JsonRenderer, TerminalRenderer,
};
use veriform_formal::ArtifactError;
use veriform_ir::ModuleAst;
use veriform_netlist::NetlistError;
use veriform_source::{SourceDb, Span};
use veriform_unify::UnifyError;

use crate::ReportFormat;

/// A failure that stops processing of one design.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The VHDL file could not be read.
    #[error("cannot read {path}: {source}")]
    Rtl {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The netlist could not be read or decoded.
    #[error(transparent)]
    Netlist(#[from] NetlistError),

    /// Neither view of the design was available.
    #[error(transparent)]
    Unify(#[from] UnifyError),

    /// An output file could not be written.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// An earlier input in the batch already produced a design of this name.
    #[error("design '{design}' is already generated from {first}; skipped to keep its output")]
    DuplicateDesign {
        /// The design name, as spelled by this input.
        design: String,
        /// The input that claimed the name first.
        first: PathBuf,
    },

    /// The design name cannot serve as an identifier and directory name.
    #[error("design name '{design}' is not a plain identifier")]
    InvalidDesignName {
        /// The rejected name.
        design: String,
    },

    /// A document could not be serialized.
    #[error("cannot serialize {what} for '{design}': {source}")]
    Serialize {
        /// Which document failed.
        what: &'static str,
        /// The design it belongs to.
        design: String,
        /// The underlying serializer error.
        source: serde_json::Error,
    },
}

impl PipelineError {
    /// The diagnostic code reported for this failure.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            Self::Rtl { .. } => DiagnosticCode::RTL_UNREADABLE,
            Self::Netlist(_) => DiagnosticCode::NETLIST_UNREADABLE,
            Self::Unify(_) => DiagnosticCode::NO_SOURCES,
            Self::Artifact(_) | Self::Serialize { .. } => DiagnosticCode::ARTIFACT_WRITE,
            Self::DuplicateDesign { .. } => DiagnosticCode::DUPLICATE_DESIGN,
            Self::InvalidDesignName { .. } => DiagnosticCode::INVALID_DESIGN_NAME,
        }
    }

    /// Records this failure in `sink` as an error diagnostic.
    pub fn report(&self, sink: &DiagnosticSink) {
        sink.emit(Diagnostic::error(self.code(), self.to_string(), Span::DUMMY));
    }
}

/// Reads and parses one VHDL file.
pub fn load_rtl(
    path: &Path,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Result<ModuleAst, PipelineError> {
    let file_id = source_db.load_file(path).map_err(|source| PipelineError::Rtl {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(veriform_vhdl_parser::parse_file(file_id, source_db, sink))
}

/// Serializes a document as pretty JSON with a trailing newline.
pub fn to_document<T: serde::Serialize>(
    value: &T,
    what: &'static str,
    design: &str,
) -> Result<String, PipelineError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| PipelineError::Serialize {
        what,
        design: design.to_string(),
        source,
    })?;
    text.push('\n');
    Ok(text)
}

/// Renders diagnostics in the requested format, one string each.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    source_db: &SourceDb,
    format: ReportFormat,
    color: bool,
) -> Vec<String> {
    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(color);
            diagnostics.iter().map(|d| renderer.render(d, source_db)).collect()
        }
        ReportFormat::Json => diagnostics.iter().map(|d| JsonRenderer.render(d, source_db)).collect(),
    }
}

/// Prints rendered diagnostics: text to stderr, JSON lines to stdout.
pub fn print_diagnostics(rendered: &[String], format: ReportFormat) {
    for line in rendered {
        match format {
            ReportFormat::Text => eprintln!("{line}"),
            ReportFormat::Json => println!("{line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_rtl_parses_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inv.vhd");
        fs::write(&path, "entity inv is port (a : in bit; y : out bit); end;").unwrap();
        let mut db = SourceDb::new();
        let sink = DiagnosticSink::new();
        let ast = load_rtl(&path, &mut db, &sink).unwrap();
        assert_eq!(ast.design_name, "inv");
        assert_eq!(ast.ports.len(), 2);
    }

    #[test]
    fn missing_rtl_is_e101() {
        let mut db = SourceDb::new();
        let sink = DiagnosticSink::new();
        let err = load_rtl(Path::new("/nonexistent/x.vhd"), &mut db, &sink).unwrap_err();
        assert_eq!(err.code(), DiagnosticCode::RTL_UNREADABLE);
        err.report(&sink);
        assert!(sink.has_errors());
        assert!(sink.diagnostics()[0].message.contains("x.vhd"));
    }

    #[test]
    fn error_codes() {
        assert_eq!(
            PipelineError::from(UnifyError::NoSources).code(),
            DiagnosticCode::NO_SOURCES
        );
        let netlist = NetlistError::Io {
            path: "n.json".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(
            PipelineError::from(netlist).code(),
            DiagnosticCode::NETLIST_UNREADABLE
        );
        let duplicate = PipelineError::DuplicateDesign {
            design: "top".into(),
            first: "a/top.vhd".into(),
        };
        assert_eq!(duplicate.code(), DiagnosticCode::DUPLICATE_DESIGN);
        assert_eq!(
            duplicate.to_string(),
            "design 'top' is already generated from a/top.vhd; skipped to keep its output"
        );
    }

    #[test]
    fn json_rendering_one_line_each() {
        let db = SourceDb::new();
        let diags = vec![
            Diagnostic::warning(DiagnosticCode::NO_PORTS, "no ports", Span::DUMMY),
            Diagnostic::error(DiagnosticCode::NO_SOURCES, "nothing", Span::DUMMY),
        ];
        let lines = render_diagnostics(&diags, &db, ReportFormat::Json, false);
        assert_eq!(lines.len(), 2);
        let v: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(v["code"], "E202");
        assert!(!lines[0].contains('\n'));
    }

    #[test]
    fn document_ends_with_newline() {
        let text = to_document(&ModuleAst::new("d"), "module", "d").unwrap();
        assert!(text.ends_with("}\n"));
    }
}
