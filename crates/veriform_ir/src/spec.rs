//! The generator-facing projection of a module.

use crate::module_ast::ModuleAst;
use crate::port::{Port, PortDirection};
use crate::property::{Property, PropertyKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the wrapper, proof-config and harness generators consume.
///
/// Persisted next to the artifacts as `<design>.spec.json`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DesignSpec {
    /// Design (entity) name.
    pub design: String,
    /// RTL file the design came from, if any.
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Ports in declaration order.
    pub ports: Vec<Port>,
    /// Assumptions in source order.
    pub assumes: Vec<Property>,
    /// Assertions in source order.
    pub asserts: Vec<Property>,
    /// Whether clocked behavior was detected.
    pub has_clock: bool,
    /// Name of the inferred clock port.
    #[serde(default)]
    pub clock_port: Option<String>,
}

impl DesignSpec {
    /// Extracts the spec from a module.
    pub fn from_ast(ast: &ModuleAst) -> Self {
        Self {
            design: ast.design_name.clone(),
            source: ast.source_rtl.clone(),
            ports: ast.ports.clone(),
            assumes: ast.properties_of(PropertyKind::Assume).cloned().collect(),
            asserts: ast.properties_of(PropertyKind::Assert).cloned().collect(),
            has_clock: ast.has_clock(),
            clock_port: ast.clock_port().map(|p| p.name.clone()),
        }
    }

    /// Input ports in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &Port> {
        self.with_direction(PortDirection::In)
    }

    /// Output ports in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &Port> {
        self.with_direction(PortDirection::Out)
    }

    /// Bidirectional ports in declaration order.
    pub fn inouts(&self) -> impl Iterator<Item = &Port> {
        self.with_direction(PortDirection::Inout)
    }

    fn with_direction(&self, direction: PortDirection) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(move |p| p.direction == direction)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_properties_and_ports() {
        let mut ast = ModuleAst::new("gate");
        ast.source_rtl = Some(PathBuf::from("gate.vhd"));
        ast.ports.push(Port::new("a", PortDirection::In, 1));
        ast.ports.push(Port::new("y", PortDirection::Out, 1));
        ast.ports.push(Port::new("bus", PortDirection::Inout, 4));
        ast.properties.push(Property::new(PropertyKind::Assert, "y == a"));
        ast.properties.push(Property::new(PropertyKind::Assume, "a == 1"));

        let spec = DesignSpec::from_ast(&ast);
        assert_eq!(spec.design, "gate");
        assert_eq!(spec.source, Some(PathBuf::from("gate.vhd")));
        assert_eq!(spec.assumes[0].expr, "a == 1");
        assert_eq!(spec.asserts[0].expr, "y == a");
        assert_eq!(spec.inputs().count(), 1);
        assert_eq!(spec.outputs().next().map(|p| p.name.as_str()), Some("y"));
        assert_eq!(spec.inouts().next().map(|p| p.width), Some(4));
        assert!(!spec.has_clock);
        assert_eq!(spec.clock_port, None);
    }

    #[test]
    fn clock_port_requires_single_bit_input() {
        let mut ast = ModuleAst::new("d");
        ast.ports.push(Port::new("clk_bus", PortDirection::In, 2));
        ast.ports.push(Port::new("Clock", PortDirection::In, 1));
        ast.set_has_clock(true);
        let spec = DesignSpec::from_ast(&ast);
        assert_eq!(spec.clock_port.as_deref(), Some("Clock"));
        assert!(spec.has_clock);
    }
}
