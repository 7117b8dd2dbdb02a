//! `veriform ast`: write the unified module document for one design.
//!
//! Parses the VHDL file and/or adapts the netlist, merges the two views when
//! both are given, and writes the result as JSON.

use veriform_diagnostics::DiagnosticSink;
use veriform_formal::write_artifact;
use veriform_ir::ModuleAst;
use veriform_netlist::load_netlist;
use veriform_source::SourceDb;
use veriform_unify::unify;

use crate::pipeline::{load_rtl, print_diagnostics, render_diagnostics, to_document, PipelineError};
use crate::{AstArgs, GlobalArgs};

/// Runs the `veriform ast` command.
///
/// Returns exit code 0 on success and 1 if the document could not be built.
pub fn run(args: &AstArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();

    let result = build(args, global, &mut source_db, &sink);
    if let Err(e) = &result {
        e.report(&sink);
    }

    let mut diagnostics = sink.take_all();
    if global.quiet {
        diagnostics.retain(|d| d.severity.is_error());
    }
    let rendered = render_diagnostics(&diagnostics, &source_db, args.format, global.color);
    print_diagnostics(&rendered, args.format);

    match result {
        Ok(ast) => {
            if !global.quiet {
                eprintln!(
                    "     Wrote {} ({} port(s), {} propert{}, {} cell(s))",
                    args.out.display(),
                    ast.ports.len(),
                    ast.properties.len(),
                    if ast.properties.len() == 1 { "y" } else { "ies" },
                    ast.cells.len()
                );
            }
            Ok(0)
        }
        Err(_) => Ok(1),
    }
}

fn build(
    args: &AstArgs,
    global: &GlobalArgs,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Result<ModuleAst, PipelineError> {
    let rtl = match &args.vhdl {
        Some(path) => {
            if !global.quiet {
                eprintln!("   Parsing {}", path.display());
            }
            Some(load_rtl(path, source_db, sink)?)
        }
        None => None,
    };

    let design_name = args
        .design_name
        .as_deref()
        .or(rtl.as_ref().map(|a| a.design_name.as_str()));
    let netlist = match &args.yosys_json {
        Some(path) => {
            if !global.quiet {
                eprintln!("   Reading {}", path.display());
            }
            Some(load_netlist(path, design_name, sink)?)
        }
        None => None,
    };

    let ast = unify(rtl, netlist, sink)?;
    write_artifact(&args.out, &to_document(&ast, "module", &ast.design_name)?)?;
    Ok(ast)
}
