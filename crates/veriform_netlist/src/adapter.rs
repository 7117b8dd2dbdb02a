//! Conversion of a netlist module into a [`ModuleAst`].

use crate::document::NetlistDocument;
use crate::error::NetlistError;
use tracing::{debug, warn};
use veriform_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use veriform_ir::stats::{CELL_COUNT, WIRE_COUNT, YOSYS_TOP};
use veriform_ir::{Cell, ModuleAst, Port, PortDirection, Wire};
use veriform_source::Span;
use std::path::Path;

/// Reads, decodes and adapts a netlist file.
///
/// The returned module records `path` as its netlist provenance. When the
/// document has no modules the design is named `design_name`, or else
/// after the file.
pub fn load_netlist(
    path: &Path,
    design_name: Option<&str>,
    sink: &DiagnosticSink,
) -> Result<ModuleAst, NetlistError> {
    let text = std::fs::read_to_string(path).map_err(|source| NetlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = NetlistDocument::from_json(&text).map_err(|source| NetlistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("netlist");
    let mut ast = netlist_to_ast(&doc, design_name, fallback, sink);
    ast.source_netlist = Some(path.to_path_buf());
    Ok(ast)
}

/// Adapts one module of `doc`.
///
/// The module named `design_name` is used when present, the first module in
/// document order otherwise. An empty document yields an empty module named
/// `design_name` or `fallback_name`, with a note.
pub fn netlist_to_ast(
    doc: &NetlistDocument,
    design_name: Option<&str>,
    fallback_name: &str,
    sink: &DiagnosticSink,
) -> ModuleAst {
    let Some((first_name, _)) = doc.modules.first() else {
        let name = design_name.filter(|n| !n.is_empty()).unwrap_or(fallback_name);
        warn!(design = name, "netlist has no modules");
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::NO_MODULES,
                format!("netlist for '{name}' contains no modules"),
                Span::DUMMY,
            )
            .with_note("the netlist contributes no ports, wires or cells"),
        );
        let mut ast = ModuleAst::new(name);
        ast.note("No modules found in netlist document.");
        return ast;
    };

    let top_name = match design_name {
        Some(wanted) if doc.modules.contains_key(wanted) => wanted,
        Some(wanted) => {
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::DESIGN_NOT_FOUND,
                    format!("module '{wanted}' not found in netlist; using '{first_name}'"),
                    Span::DUMMY,
                )
                .with_help("pass the elaborated top-level name, or omit it to take the first module"),
            );
            first_name.as_str()
        }
        None => first_name.as_str(),
    };
    let module = &doc.modules[top_name];
    let mut ast = ModuleAst::new(top_name);
    if design_name.is_some_and(|wanted| wanted != top_name) {
        ast.note(format!(
            "Module '{}' not found in netlist; used '{top_name}'.",
            design_name.unwrap_or_default()
        ));
    }

    for (name, raw) in &module.ports {
        let direction = raw
            .direction
            .as_deref()
            .and_then(PortDirection::from_keyword)
            .unwrap_or(PortDirection::In);
        ast.ports.push(Port::new(name, direction, bit_count(raw.bits.len())));
    }
    for (name, raw) in &module.netnames {
        ast.wires.push(Wire::new(name, bit_count(raw.bits.len())));
    }
    for (name, raw) in &module.cells {
        ast.cells.push(Cell {
            name: name.clone(),
            cell_type: raw.cell_type.clone(),
            connections: raw.connections.clone(),
        });
    }

    ast.stats.insert(YOSYS_TOP.to_string(), top_name.into());
    ast.stats.insert(CELL_COUNT.to_string(), ast.cells.len().into());
    ast.stats.insert(WIRE_COUNT.to_string(), ast.wires.len().into());
    debug!(
        top = top_name,
        ports = ast.ports.len(),
        wires = ast.wires.len(),
        cells = ast.cells.len(),
        "adapted netlist module"
    );
    ast
}

fn bit_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX).max(1)
}
