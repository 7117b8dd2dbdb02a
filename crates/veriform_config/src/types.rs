//! Settings deserialized from `veriform.toml`.

use serde::Deserialize;

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Proof configuration generation.
    pub proof: ProofSettings,
    /// Artifact naming.
    pub output: OutputSettings,
}

/// Settings that flow into the generated `.sby` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProofSettings {
    /// Bounded model checking depth used for clocked designs.
    pub depth: u32,
    /// Solver engine written under `[engines]`.
    pub engine: String,
    /// VHDL standard passed to the ghdl elaboration step (`--std=<vhdl_std>`).
    pub vhdl_std: String,
}

impl Default for ProofSettings {
    fn default() -> Self {
        Self {
            depth: 20,
            engine: "smtbmc".to_string(),
            vhdl_std: "08".to_string(),
        }
    }
}

/// Naming of the generated verification wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Prefix of the wrapper file name, e.g. `verif_` gives `verif_alu.sv`.
    pub wrapper_prefix: String,
    /// Prefix of the wrapper module name, e.g. `verify_` gives `verify_alu`.
    pub module_prefix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            wrapper_prefix: "verif_".to_string(),
            module_prefix: "verify_".to_string(),
        }
    }
}
