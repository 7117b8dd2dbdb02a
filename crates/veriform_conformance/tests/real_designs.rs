//! Realistic designs through the whole pipeline.

use veriform_conformance::full_pipeline;
use veriform_diagnostics::DiagnosticCode;
use veriform_ir::PortDirection;

#[test]
fn uart_transmitter_with_generics() {
    let src = r#"
library ieee;
use ieee.std_logic_1164.all;
use ieee.numeric_std.all;

entity uart_tx is
  generic (
    CLKS_PER_BIT : integer := 87;
    DATA_BITS    : natural := 8
  );
  port (
    i_clk       : in  std_logic;
    i_tx_dv     : in  std_logic;
    i_tx_byte   : in  std_logic_vector(7 downto 0);
    o_tx_active : out std_logic;
    o_tx_serial : out std_logic;
    o_tx_done   : out std_logic
  );
end uart_tx;

architecture rtl of uart_tx is
  type t_state is (s_idle, s_start, s_data, s_stop, s_cleanup);
  signal r_state     : t_state := s_idle;
  signal r_clk_count : integer range 0 to CLKS_PER_BIT - 1 := 0;
  signal r_bit_index : integer range 0 to 7 := 0; -- 8 bits total
begin
  -- @c2vhdl:ASSUME i_tx_dv == 0 || o_tx_active == 0;
  -- @c2vhdl:ASSERT !(o_tx_done && o_tx_active) report "done and active together";
  -- @c2vhdl:ASSERT $past(o_tx_done) -> !o_tx_done;
  p_uart_tx : process (i_clk)
  begin
    if rising_edge(i_clk) then
      case r_state is
        when s_idle =>
          o_tx_active <= '0';
          o_tx_serial <= '1';
          if i_tx_dv = '1' then
            r_state <= s_start;
          end if;
        when others =>
          r_state <= s_idle;
      end case;
    end if;
  end process p_uart_tx;
end rtl;
"#;
    let result = full_pipeline(src, None);
    assert!(!result.has_errors, "{:?}", result.diagnostics);
    assert_eq!(result.warning_count, 0, "{:?}", result.diagnostics);

    let ast = &result.ast;
    assert_eq!(ast.design_name, "uart_tx");
    let ports: Vec<_> = ast.ports.iter().map(|p| (p.name.as_str(), p.direction, p.width)).collect();
    assert_eq!(
        ports,
        [
            ("i_clk", PortDirection::In, 1),
            ("i_tx_dv", PortDirection::In, 1),
            ("i_tx_byte", PortDirection::In, 8),
            ("o_tx_active", PortDirection::Out, 1),
            ("o_tx_serial", PortDirection::Out, 1),
            ("o_tx_done", PortDirection::Out, 1),
        ]
    );
    assert!(ast.has_clock());
    assert_eq!(result.spec.clock_port.as_deref(), Some("i_clk"));
    assert_eq!(ast.properties[1].msg.as_deref(), Some("done and active together"));

    let wrapper = &result.artifacts.wrapper.contents;
    assert!(wrapper.contains("    always @(posedge i_clk) begin\n        assert ($past(o_tx_done) -> !o_tx_done);\n"));
    assert!(wrapper.contains("        assert (!(o_tx_done && o_tx_active)); // done and active together\n"));
}

#[test]
fn fifo_with_integer_ports_and_default_values() {
    let src = r#"
entity fifo is
  port (
    clk, rst     : in  std_logic;
    wr_en, rd_en : in  std_logic;
    din          : in  std_logic_vector(31 downto 0);
    dout         : out std_logic_vector(31 downto 0) := (others => '0');
    level        : out integer range 0 to 16;
    full, empty  : buffer std_logic
  );
end entity;

architecture behav of fifo is
begin
  process (clk, rst)
  begin
    if rst = '1' then
      null;
    elsif clk'event and clk = '1' then
      null;
    end if;
  end process;
  -- @c2vhdl:ASSERT !(full && empty);
  -- @c2vhdl:ASSERT level <= 16;
end architecture;
"#;
    let result = full_pipeline(src, None);
    assert!(!result.has_errors);
    let ast = &result.ast;
    assert_eq!(ast.ports.len(), 9);
    assert_eq!(ast.port("din").map(|p| p.width), Some(32));
    assert_eq!(ast.port("dout").map(|p| p.width), Some(32));
    assert_eq!(ast.port("level").map(|p| p.width), Some(5));
    assert_eq!(ast.port("full").map(|p| p.direction), Some(PortDirection::Out));
    assert!(ast.has_clock());

    let c = &result.artifacts.harness.contents;
    assert!(c.contains("    unsigned int din = __VERIFIER_nondet_uint();"));
    assert!(c.contains("    unsigned char level = 0;\n"));
    assert!(!result.artifacts.wrapper.contents.contains("dropped"));
}

#[test]
fn wide_bus_uses_64_bit_storage() {
    let src = "entity wide is port (k : in std_logic_vector(127 downto 0); ok : out std_logic); end;";
    let result = full_pipeline(src, None);
    assert!(result.artifacts.harness.contents.contains("unsigned long long k = __VERIFIER_nondet_ulonglong();"));
    assert!(result.artifacts.wrapper.contents.contains("    input [127:0] k,\n"));
}

#[test]
fn nonstandard_formatting_falls_back_to_scan() {
    let src = "\
-- ports declared outside any port clause
clk : in std_logic;
data : in std_logic_vector(3 downto 0);
valid : out std_logic;
-- @c2vhdl:ASSERT valid == 0;
";
    let result = full_pipeline(src, None);
    assert_eq!(result.ast.design_name, "test");
    assert_eq!(result.ast.ports.len(), 3);
    assert_eq!(
        result.codes(),
        [DiagnosticCode::NO_ENTITY, DiagnosticCode::NO_PORT_BLOCK]
    );
    assert_eq!(result.ast.notes.len(), 2);
    assert!(result.artifacts.wrapper.contents.contains("module verify_test ("));
}

#[test]
fn merged_design_uses_netlist_top_name() {
    let rtl = "entity Core is port (a : in bit; y : out bit); end;";
    let netlist = r#"{"modules": {"core": {"ports": {
        "a": {"direction": "input", "bits": [2]},
        "y": {"direction": "output", "bits": [3]}}}}}"#;
    let result = full_pipeline(rtl, Some(netlist));
    assert_eq!(result.ast.design_name, "core");
    assert_eq!(result.artifacts.sby.file_name, "core.sby");
    assert!(result.ast.notes.iter().any(|n| n.contains("'Core'")));
}
