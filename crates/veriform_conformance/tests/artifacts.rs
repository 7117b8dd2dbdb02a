//! Generator conformance: wrapper blocks, proof modes, harness types and
//! document round-trips.

use veriform_conformance::{full_pipeline, full_pipeline_with_config};
use veriform_config::load_config_from_str;
use veriform_diagnostics::DiagnosticCode;
use veriform_formal::{is_sequential, CType, ProofMode};
use veriform_ir::{DesignSpec, ModuleAst};

const CLOCKED: &str = "\
entity acc is
  port (
    clk : in std_logic;
    d   : in unsigned(3 downto 0);
    q   : out unsigned(7 downto 0)
  );
end acc;
architecture rtl of acc is
begin
  process (clk) begin
    if rising_edge(clk) then
      q <= q + d;
    end if;
  end process;
  -- @c2vhdl:ASSUME d < 8;
  -- @c2vhdl:ASSERT q >= $past(q);
  -- @c2vhdl:ASSERT q != 255;
end rtl;
";

const COMBINATIONAL: &str = "\
entity mux is
  port (
    s    : in bit;
    a, b : in bit_vector(15 downto 0);
    y    : out bit_vector(15 downto 0)
  );
end mux;
architecture rtl of mux is
begin
  y <= a when s = '0' else b;
  -- @c2vhdl:ASSERT s == 1 || y == a;
  -- @c2vhdl:ASSERT y == $past(y);
end rtl;
";

/// Splits the wrapper into its level-sensitive and clocked block bodies.
fn blocks(wrapper: &str) -> (String, Option<String>) {
    let body = |start: &str| {
        wrapper.find(start).map(|i| {
            let rest = &wrapper[i + start.len()..];
            rest[..rest.find("    end\n").unwrap_or(rest.len())].to_string()
        })
    };
    (body("always @(*) begin\n").unwrap_or_default(), body("always @(posedge clk) begin\n"))
}

#[test]
fn past_reference_goes_to_clocked_block() {
    let result = full_pipeline(CLOCKED, None);
    let (comb, clocked) = blocks(&result.artifacts.wrapper.contents);
    let clocked = clocked.expect("clocked block");
    assert!(clocked.contains("assert (q >= $past(q));"));
    assert!(!comb.contains("$past"));
    assert!(comb.contains("assume (d < 8);"));
    assert!(comb.contains("assert (q != 255);"));
    assert!(comb.find("assume").unwrap() < comb.find("assert").unwrap());
}

#[test]
fn no_clock_means_no_clocked_block() {
    let result = full_pipeline(COMBINATIONAL, None);
    let wrapper = &result.artifacts.wrapper.contents;
    assert!(!wrapper.contains("posedge"));
    assert!(wrapper.contains("assert (s == 1 || y == a);"));
    assert!(result.codes().contains(&DiagnosticCode::SEQUENTIAL_DROPPED));
    assert!(wrapper.contains("//   y == $past(y)"));
}

#[test]
fn classifier_is_substring_only() {
    assert!(is_sequential("$past(a, 2) == b"));
    assert!(!is_sequential("a_prev == b"));
}

#[test]
fn wrapper_mirrors_ports() {
    let result = full_pipeline(COMBINATIONAL, None);
    let wrapper = &result.artifacts.wrapper.contents;
    assert!(wrapper.starts_with("// Verification wrapper for `mux`.\nmodule verify_mux (\n"));
    for line in [
        "    input s,\n",
        "    input [15:0] a,\n",
        "    input [15:0] b,\n",
        "    output [15:0] y\n",
        "    mux dut (\n",
        "        .y(y)\n",
    ] {
        assert!(wrapper.contains(line), "missing {line:?}");
    }
    assert!(wrapper.ends_with("endmodule\n"));
}

#[test]
fn wrapper_is_deterministic() {
    let a = full_pipeline(CLOCKED, None);
    let b = full_pipeline(CLOCKED, None);
    assert_eq!(a.artifacts, b.artifacts);
}

#[test]
fn clocked_design_gets_bmc_depth_20() {
    let result = full_pipeline(CLOCKED, None);
    assert_eq!(ProofMode::select(result.spec.has_clock, 20), ProofMode::Bmc { depth: 20 });
    let sby = &result.artifacts.sby.contents;
    assert!(sby.starts_with("[options]\nmode bmc\ndepth 20\n"));
    for section in ["[engines]\nsmtbmc\n", "[script]\n", "[files]\n"] {
        assert!(sby.contains(section));
    }
    assert!(sby.contains("prep -top verify_acc\n"));
}

#[test]
fn combinational_design_gets_full_proof() {
    let result = full_pipeline(COMBINATIONAL, None);
    let sby = &result.artifacts.sby.contents;
    assert!(sby.starts_with("[options]\nmode prove\n\n"));
    assert!(!sby.contains("depth"));
}

#[test]
fn configured_depth_and_prefixes() {
    let config = load_config_from_str(
        "[proof]\ndepth = 50\nengine = \"abc pdr\"\n[output]\nmodule_prefix = \"formal_\"\n",
    )
    .unwrap();
    let result = full_pipeline_with_config(CLOCKED, None, &config);
    let sby = &result.artifacts.sby.contents;
    assert!(sby.contains("depth 50\n"));
    assert!(sby.contains("[engines]\nabc pdr\n"));
    assert!(sby.contains("prep -top formal_acc\n"));
    assert!(result.artifacts.wrapper.contents.contains("module formal_acc ("));
}

#[test]
fn harness_type_categories() {
    assert_eq!(CType::for_width(1), CType::UChar);
    assert_eq!(CType::for_width(9), CType::UShort);
    assert_eq!(CType::for_width(17), CType::UInt);
    assert_eq!(CType::for_width(33), CType::ULongLong);
    let names: Vec<_> = CType::ALL.iter().map(|t| t.c_name()).collect();
    assert_eq!(names, ["unsigned char", "unsigned short", "unsigned int", "unsigned long long"]);
}

#[test]
fn harness_drives_inputs_and_zeroes_outputs() {
    let result = full_pipeline(COMBINATIONAL, None);
    let c = &result.artifacts.harness.contents;
    assert!(c.contains("    unsigned char s = __VERIFIER_nondet_uchar();"));
    assert!(c.contains("    unsigned short a = __VERIFIER_nondet_ushort();"));
    assert!(c.contains("    unsigned short y = 0;\n"));
    assert!(c.contains("    // ASSERT: s == 1 || y == a\n"));
    assert!(c.contains("    // mux_step();\n"));
    assert!(!c.contains("\n    mux_step();"));
}

#[test]
fn module_document_round_trip() {
    let netlist = r#"{"modules": {"acc": {
        "ports": {"q": {"direction": "output", "bits": [2, 3, 4, 5, 6, 7, 8, 9]}},
        "cells": {"$add$2": {"type": "$add", "connections": {"A": [2, "1"], "Y": [3]}}},
        "netnames": {"q": {"bits": [2, 3, 4, 5, 6, 7, 8, 9]}}}}}"#;
    let result = full_pipeline(CLOCKED, Some(netlist));
    let text = result.ast.to_json().unwrap();
    let back = ModuleAst::from_json(&text).unwrap();
    assert_eq!(back, result.ast);
    assert_eq!(back.cells[0].connections["A"].len(), 2);
}

#[test]
fn spec_document_lists_partitioned_ports() {
    let result = full_pipeline(CLOCKED, None);
    let spec: DesignSpec = serde_json::from_str(&result.spec.to_json().unwrap()).unwrap();
    assert_eq!(spec, result.spec);
    assert_eq!(spec.inputs().count(), 2);
    assert_eq!(spec.outputs().count(), 1);
    assert_eq!(spec.clock_port.as_deref(), Some("clk"));
    assert_eq!(spec.assumes.len(), 1);
    assert_eq!(spec.asserts.len(), 2);
}
