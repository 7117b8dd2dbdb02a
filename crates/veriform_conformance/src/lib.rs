//! Conformance test helpers for veriform.
//!
//! Provides shared pipeline functions that run source text through the full
//! pipeline (parse → adapt → merge → extract → generate) and return
//! structured results for assertion in integration tests.

#![warn(missing_docs)]

use veriform_config::ProjectConfig;
use veriform_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
use veriform_formal::{generate_bundle, ArtifactBundle};
use veriform_ir::{DesignSpec, ModuleAst};
use veriform_netlist::{netlist_to_ast, NetlistDocument};
use veriform_source::{SourceDb, Span};
use veriform_unify::merge;

/// File name given to VHDL text passed in as a string.
pub const TEST_RTL_FILE: &str = "test.vhd";

/// Result of running the full pipeline on one design.
pub struct PipelineResult {
    /// The merged module.
    pub ast: ModuleAst,
    /// The spec extracted from it.
    pub spec: DesignSpec,
    /// The generated wrapper, proof configuration and harness.
    pub artifacts: ArtifactBundle,
    /// All diagnostics emitted during the pipeline.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// Codes of all diagnostics, in emission order.
    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }
}

/// Parses VHDL text as if read from `name`.
pub fn parse_vhdl_named(name: &str, source: &str) -> (ModuleAst, Vec<Diagnostic>) {
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let file_id = source_db.add_source(name, source.to_string());
    let ast = veriform_vhdl_parser::parse_file(file_id, &source_db, &sink);
    (ast, sink.take_all())
}

/// Parses VHDL text as [`TEST_RTL_FILE`].
pub fn parse_vhdl(source: &str) -> (ModuleAst, Vec<Diagnostic>) {
    parse_vhdl_named(TEST_RTL_FILE, source)
}

/// Adapts Yosys JSON text, selecting `design` when present.
pub fn adapt_netlist(
    json: &str,
    design: Option<&str>,
) -> serde_json::Result<(ModuleAst, Vec<Diagnostic>)> {
    let doc = NetlistDocument::from_json(json)?;
    let sink = DiagnosticSink::new();
    let ast = netlist_to_ast(&doc, design, "netlist", &sink);
    Ok((ast, sink.take_all()))
}

/// Runs the full pipeline with default settings.
pub fn full_pipeline(vhdl: &str, netlist: Option<&str>) -> PipelineResult {
    full_pipeline_with_config(vhdl, netlist, &ProjectConfig::default())
}

/// Runs the full pipeline with explicit settings.
///
/// A netlist that is not valid JSON is reported as an error and the design
/// continues with the RTL view alone.
pub fn full_pipeline_with_config(
    vhdl: &str,
    netlist: Option<&str>,
    config: &ProjectConfig,
) -> PipelineResult {
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();

    let file_id = source_db.add_source(TEST_RTL_FILE, vhdl.to_string());
    let rtl = veriform_vhdl_parser::parse_file(file_id, &source_db, &sink);

    let netlist = netlist.and_then(|json| match NetlistDocument::from_json(json) {
        Ok(doc) => Some(netlist_to_ast(&doc, Some(rtl.design_name.as_str()), "netlist", &sink)),
        Err(e) => {
            sink.emit(Diagnostic::error(
                DiagnosticCode::NETLIST_UNREADABLE,
                format!("cannot decode netlist: {e}"),
                Span::DUMMY,
            ));
            None
        }
    });

    let ast = match netlist {
        Some(netlist) => merge(&rtl, &netlist, &sink),
        None => rtl,
    };
    let spec = DesignSpec::from_ast(&ast);
    let artifacts = generate_bundle(&spec, config, &sink);

    let diagnostics = sink.take_all();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    PipelineResult {
        has_errors: diagnostics.iter().any(|d| d.severity.is_error()),
        warning_count,
        ast,
        spec,
        artifacts,
        diagnostics,
    }
}
