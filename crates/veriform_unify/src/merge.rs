//! Fixed-precedence merge of an RTL module and a netlist module.
//!
//! | Field | Result |
//! |---|---|
//! | design name | netlist's, unless empty |
//! | provenance | each side's own path |
//! | ports | by name, netlist wins; see [`merge_by_name`] for order |
//! | wires, cells | netlist only |
//! | properties | RTL only |
//! | stats | union, netlist wins on key collision |
//! | notes | RTL notes, then netlist notes |

use tracing::debug;
use veriform_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use veriform_ir::{ModuleAst, Port};
use veriform_source::Span;

/// Which side wins when both sequences hold an item with the same name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precedence {
    /// Keep the base item.
    Base,
    /// Replace it with the overlay item.
    Overlay,
}

/// Merges two name-keyed sequences into one with every name exactly once.
///
/// The result lists `base` in its own order, each item replaced in place by
/// its overlay counterpart when `precedence` is [`Precedence::Overlay`],
/// followed by overlay-only items in overlay order. Names are compared
/// ASCII case-insensitively, as VHDL identifiers are, so the winning side
/// also supplies the spelling. Duplicate names within one input keep their
/// first occurrence.
pub fn merge_by_name<T, F>(base: &[T], overlay: &[T], precedence: Precedence, name: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let same = |a: &T, b: &T| name(a).eq_ignore_ascii_case(name(b));
    let mut out: Vec<T> = Vec::with_capacity(base.len() + overlay.len());
    for item in base {
        if out.iter().any(|o| same(o, item)) {
            continue;
        }
        let replacement = match precedence {
            Precedence::Overlay => overlay.iter().find(|o| same(o, item)),
            Precedence::Base => None,
        };
        out.push(replacement.unwrap_or(item).clone());
    }
    for item in overlay {
        if !out.iter().any(|o| same(o, item)) {
            out.push(item.clone());
        }
    }
    out
}

/// Merges an RTL-derived module with a netlist-derived module.
///
/// Ports whose width or direction differ between the views are resolved in
/// favor of the netlist, with a warning and a note so the change is visible.
pub fn merge(rtl: &ModuleAst, netlist: &ModuleAst, sink: &DiagnosticSink) -> ModuleAst {
    let name = if netlist.design_name.is_empty() {
        &rtl.design_name
    } else {
        &netlist.design_name
    };
    let mut out = ModuleAst::new(name.clone());
    out.source_rtl = rtl.source_rtl.clone();
    out.source_netlist = netlist.source_netlist.clone();

    out.ports = merge_by_name(&rtl.ports, &netlist.ports, Precedence::Overlay, |p: &Port| {
        p.name.as_str()
    });
    out.wires = netlist.wires.clone();
    out.cells = netlist.cells.clone();
    out.properties = rtl.properties.clone();

    out.stats = rtl.stats.clone();
    out.stats
        .extend(netlist.stats.iter().map(|(k, v)| (k.clone(), v.clone())));

    out.notes = rtl.notes.iter().chain(&netlist.notes).cloned().collect();
    for conflict in port_conflicts(rtl, netlist) {
        sink.emit(Diagnostic::warning(
            DiagnosticCode::PORT_CONFLICT,
            conflict.clone(),
            Span::DUMMY,
        ));
        out.note(conflict);
    }

    debug!(
        design = %out.design_name,
        ports = out.ports.len(),
        properties = out.properties.len(),
        cells = out.cells.len(),
        "merged RTL and netlist views"
    );
    out
}

fn port_conflicts(rtl: &ModuleAst, netlist: &ModuleAst) -> Vec<String> {
    rtl.ports
        .iter()
        .filter_map(|r| {
            let n = netlist
                .ports
                .iter()
                .find(|n| n.name.eq_ignore_ascii_case(&r.name))?;
            if n.width == r.width && n.direction == r.direction {
                return None;
            }
            Some(format!(
                "Port '{}' is {} [{}] in RTL but {} [{}] in netlist; using netlist.",
                n.name, r.direction, r.width, n.direction, n.width
            ))
        })
        .collect()
}
