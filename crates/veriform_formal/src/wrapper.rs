//! SystemVerilog verification wrapper.
//!
//! The wrapper re-exports every port of the design under test, instantiates
//! it as `dut`, and carries the annotated properties:
//!
//! ```systemverilog
//! module verify_counter (
//!     input clk,
//!     output [7:0] count
//! );
//!
//!     counter dut (
//!         .clk(clk),
//!         .count(count)
//!     );
//!
//!     always @(*) begin
//!         assert (count < 200);
//!     end
//!
//!     always @(posedge clk) begin
//!         assert (count == $past(count) + 1);
//!     end
//! endmodule
//! ```

use std::fmt::Write;

use tracing::{debug, warn};
use veriform_config::OutputSettings;
use veriform_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use veriform_ir::{DesignSpec, Port, PortDirection, Property};
use veriform_source::Span;

/// The previous-cycle operator that marks an assertion as sequential.
pub const PAST_OPERATOR: &str = "$past";

/// Classifies an assertion as sequential by looking for [`PAST_OPERATOR`].
///
/// This is a plain substring test. Expressions that refer to earlier cycles
/// any other way are classified as combinational.
pub fn is_sequential(expr: &str) -> bool {
    expr.contains(PAST_OPERATOR)
}

/// Name of the generated wrapper module, e.g. `verify_counter`.
pub fn wrapper_module_name(design: &str, output: &OutputSettings) -> String {
    format!("{}{design}", output.module_prefix)
}

/// File name of the generated wrapper, e.g. `verif_counter.sv`.
pub fn wrapper_file_name(design: &str, output: &OutputSettings) -> String {
    format!("{}{design}.sv", output.wrapper_prefix)
}

/// Renders the wrapper module for `spec`.
///
/// Sequential assertions need a clock edge. When no clock was detected, or
/// no port looks like one, they are left out with a warning and a comment
/// in the generated module.
pub fn generate_wrapper(spec: &DesignSpec, output: &OutputSettings, sink: &DiagnosticSink) -> String {
    let module = wrapper_module_name(&spec.design, output);
    let (sequential, combinational): (Vec<&Property>, Vec<&Property>) =
        spec.asserts.iter().partition(|p| is_sequential(&p.expr));

    if spec.ports.is_empty() {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::NO_PORTS,
                format!("design `{}` has no ports", spec.design),
                Span::DUMMY,
            )
            .with_note("the wrapper instantiates the design with no connections"),
        );
    }

    let mut out = String::new();
    let _ = writeln!(out, "// Verification wrapper for `{}`.", spec.design);
    write_header(&mut out, &module, &spec.ports);
    write_instance(&mut out, &spec.design, &spec.ports);

    let _ = writeln!(out, "    always @(*) begin");
    for p in &spec.assumes {
        write_property(&mut out, "assume", p);
    }
    for p in &combinational {
        write_property(&mut out, "assert", p);
    }
    let _ = writeln!(out, "    end");

    let clock = spec.clock_port.as_deref().filter(|_| spec.has_clock);
    match clock {
        Some(clk) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "    always @(posedge {clk}) begin");
            for p in &sequential {
                write_property(&mut out, "assert", p);
            }
            let _ = writeln!(out, "    end");
        }
        None if !sequential.is_empty() => {
            let reason = if spec.has_clock {
                "no clock port was found"
            } else {
                "no clock was detected"
            };
            warn!(design = %spec.design, dropped = sequential.len(), "{reason}");
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::SEQUENTIAL_DROPPED,
                    format!(
                        "{} sequential assertion(s) in `{}` dropped: {reason}",
                        sequential.len(),
                        spec.design
                    ),
                    Span::DUMMY,
                )
                .with_help("add a clock port named like `clk` or `clock` with an edge-triggered process"),
            );
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "    // {} sequential assertion(s) dropped: {reason}",
                sequential.len()
            );
            for p in &sequential {
                let _ = writeln!(out, "    //   {}", p.expr);
            }
        }
        None => {}
    }
    let _ = writeln!(out, "endmodule");

    debug!(
        module = %module,
        combinational = combinational.len(),
        sequential = sequential.len(),
        "generated wrapper"
    );
    out
}

fn write_header(out: &mut String, module: &str, ports: &[Port]) {
    if ports.is_empty() {
        let _ = writeln!(out, "module {module} ();");
        let _ = writeln!(out);
        return;
    }
    let _ = writeln!(out, "module {module} (");
    for (i, port) in ports.iter().enumerate() {
        let sep = if i + 1 < ports.len() { "," } else { "" };
        let dir = sv_direction(port.direction);
        if port.width == 1 {
            let _ = writeln!(out, "    {dir} {}{sep}", port.name);
        } else {
            let _ = writeln!(out, "    {dir} [{}:0] {}{sep}", port.msb(), port.name);
        }
    }
    let _ = writeln!(out, ");");
    let _ = writeln!(out);
}

fn write_instance(out: &mut String, design: &str, ports: &[Port]) {
    if ports.is_empty() {
        let _ = writeln!(out, "    {design} dut ();");
        let _ = writeln!(out);
        return;
    }
    let _ = writeln!(out, "    {design} dut (");
    for (i, port) in ports.iter().enumerate() {
        let sep = if i + 1 < ports.len() { "," } else { "" };
        let _ = writeln!(out, "        .{0}({0}){sep}", port.name);
    }
    let _ = writeln!(out, "    );");
    let _ = writeln!(out);
}

fn write_property(out: &mut String, keyword: &str, property: &Property) {
    let _ = write!(out, "        {keyword} ({});", property.expr);
    if let Some(msg) = &property.msg {
        let _ = write!(out, " // {msg}");
    }
    let _ = writeln!(out);
}

fn sv_direction(direction: PortDirection) -> &'static str {
    match direction {
        PortDirection::In => "input",
        PortDirection::Out => "output",
        PortDirection::Inout => "inout",
    }
}
