//! SymbiYosys proof configuration (`.sby`).
//!
//! Clocked designs get a bounded check; combinational ones get a full
//! proof. The script loads the wrapper, elaborates the VHDL entity through
//! the ghdl plugin and flattens at the wrapper module.

use std::fmt::{self, Write};
use std::path::Path;

use veriform_config::ProofSettings;
use veriform_ir::DesignSpec;

/// Proof strategy written under `[options]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProofMode {
    /// Bounded model check up to `depth` steps.
    Bmc {
        /// Number of steps to unroll.
        depth: u32,
    },
    /// Unbounded proof.
    Prove,
}

impl ProofMode {
    /// Bounded mode when the design has a clock, full proof otherwise.
    pub fn select(has_clock: bool, depth: u32) -> Self {
        if has_clock {
            Self::Bmc { depth }
        } else {
            Self::Prove
        }
    }
}

impl fmt::Display for ProofMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bmc { depth } => write!(f, "mode bmc\ndepth {depth}"),
            Self::Prove => f.write_str("mode prove"),
        }
    }
}

/// File and module names the script refers to.
///
/// SymbiYosys copies every `[files]` entry into its work directory under
/// its basename, so the script itself only uses basenames.
#[derive(Clone, Copy, Debug)]
pub struct SbyInputs<'a> {
    /// Path of the VHDL source, as listed under `[files]`.
    pub rtl_path: &'a str,
    /// The generated wrapper, expected next to the `.sby` file.
    pub wrapper_file: &'a str,
    /// The wrapper module, used as the elaboration top.
    pub wrapper_module: &'a str,
}

/// File name of the proof configuration, e.g. `counter.sby`.
pub fn sby_file_name(design: &str) -> String {
    format!("{design}.sby")
}

/// File name of the flattened Verilog the script writes.
pub fn elaborated_file_name(design: &str) -> String {
    format!("elaborated_{design}.v")
}

/// Renders the `.sby` document for `spec`.
pub fn generate_sby(spec: &DesignSpec, inputs: SbyInputs<'_>, proof: &ProofSettings) -> String {
    let mode = ProofMode::select(spec.has_clock, proof.depth);
    let entity = &spec.design;
    let rtl_file = Path::new(inputs.rtl_path)
        .file_name()
        .map_or(inputs.rtl_path.into(), |n| n.to_string_lossy());

    let mut out = String::new();
    let _ = writeln!(out, "[options]");
    let _ = writeln!(out, "{mode}");
    let _ = writeln!(out);
    let _ = writeln!(out, "[engines]");
    let _ = writeln!(out, "{}", proof.engine);
    let _ = writeln!(out);
    let _ = writeln!(out, "[script]");
    let _ = writeln!(out, "plugin -i ghdl");
    let _ = writeln!(out, "read_verilog -sv {}", inputs.wrapper_file);
    let _ = writeln!(out, "ghdl --std={} {} -e {entity}", proof.vhdl_std, rtl_file);
    let _ = writeln!(out, "prep -top {}", inputs.wrapper_module);
    let _ = writeln!(out, "write_verilog -noattr {}", elaborated_file_name(entity));
    let _ = writeln!(out);
    let _ = writeln!(out, "[files]");
    let _ = writeln!(out, "{}", inputs.wrapper_file);
    let _ = writeln!(out, "{}", inputs.rtl_path);
    out
}
