//! All three artifacts for one design, named and rendered together.

use veriform_config::ProjectConfig;
use veriform_diagnostics::DiagnosticSink;
use veriform_ir::DesignSpec;

use crate::harness::{generate_harness, harness_file_name};
use crate::proof_config::{generate_sby, sby_file_name, SbyInputs};
use crate::wrapper::{generate_wrapper, wrapper_file_name, wrapper_module_name};

/// One generated file: its name within the design's output directory and
/// its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Bare file name, e.g. `verif_counter.sv`.
    pub file_name: String,
    /// Full file contents.
    pub contents: String,
}

/// The wrapper, proof configuration and harness for one design.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactBundle {
    /// SystemVerilog verification wrapper.
    pub wrapper: Artifact,
    /// SymbiYosys configuration.
    pub sby: Artifact,
    /// Bounded-model-check C harness.
    pub harness: Artifact,
}

impl ArtifactBundle {
    /// The artifacts in the order they are written.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        [&self.wrapper, &self.sby, &self.harness].into_iter()
    }
}

/// Renders every artifact for `spec` using the project settings.
///
/// The `.sby` file lists the spec's RTL source path as given; when the spec
/// has no RTL source, `<design>.vhd` is assumed.
pub fn generate_bundle(spec: &DesignSpec, config: &ProjectConfig, sink: &DiagnosticSink) -> ArtifactBundle {
    let design = spec.design.as_str();
    let wrapper_file = wrapper_file_name(design, &config.output);
    let wrapper_module = wrapper_module_name(design, &config.output);
    let rtl_path = spec
        .source
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| format!("{design}.vhd"));

    let sby = generate_sby(
        spec,
        SbyInputs {
            rtl_path: &rtl_path,
            wrapper_file: &wrapper_file,
            wrapper_module: &wrapper_module,
        },
        &config.proof,
    );
    ArtifactBundle {
        wrapper: Artifact {
            contents: generate_wrapper(spec, &config.output, sink),
            file_name: wrapper_file,
        },
        sby: Artifact {
            file_name: sby_file_name(design),
            contents: sby,
        },
        harness: Artifact {
            file_name: harness_file_name(design),
            contents: generate_harness(spec),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriform_ir::{Port, PortDirection};

    #[test]
    fn names_and_rtl_path() {
        let spec = DesignSpec {
            design: "blink".into(),
            source: Some("rtl/deep/blink.vhdl".into()),
            ports: vec![Port::new("clk", PortDirection::In, 1)],
            assumes: Vec::new(),
            asserts: Vec::new(),
            has_clock: true,
            clock_port: Some("clk".into()),
        };
        let sink = DiagnosticSink::new();
        let bundle = generate_bundle(&spec, &ProjectConfig::default(), &sink);
        let names: Vec<_> = bundle.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, ["verif_blink.sv", "blink.sby", "blink_harness.c"]);
        assert!(bundle.sby.contents.contains("ghdl --std=08 blink.vhdl -e blink\n"));
        assert!(bundle.sby.contents.contains("[files]\nverif_blink.sv\nrtl/deep/blink.vhdl\n"));
    }

    #[test]
    fn missing_source_assumes_vhd() {
        let spec = DesignSpec {
            design: "gate".into(),
            source: None,
            ports: Vec::new(),
            assumes: Vec::new(),
            asserts: Vec::new(),
            has_clock: false,
            clock_port: None,
        };
        let sink = DiagnosticSink::new();
        let bundle = generate_bundle(&spec, &ProjectConfig::default(), &sink);
        assert!(bundle.sby.contents.contains("gate.vhd -e gate"));
    }
}
