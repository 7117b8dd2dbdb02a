//! Serde model of a Yosys `write_json` document.
//!
//! Only the fields the adapter reads are modelled; unknown fields such as
//! `creator`, `attributes`, `hide_name` or `port_directions` are ignored.

use indexmap::IndexMap;
use serde::Deserialize;
use veriform_ir::SignalBit;

/// A whole netlist document.
#[derive(Debug, Default, Deserialize)]
pub struct NetlistDocument {
    /// Modules, in document order.
    #[serde(default)]
    pub modules: IndexMap<String, RawModule>,
}

/// One module.
#[derive(Debug, Default, Deserialize)]
pub struct RawModule {
    /// Ports, in document order.
    #[serde(default)]
    pub ports: IndexMap<String, RawPort>,
    /// Named nets, in document order.
    #[serde(default)]
    pub netnames: IndexMap<String, RawNet>,
    /// Cells, in document order.
    #[serde(default)]
    pub cells: IndexMap<String, RawCell>,
}

/// A module port.
#[derive(Debug, Default, Deserialize)]
pub struct RawPort {
    /// `input`, `output` or `inout`.
    #[serde(default)]
    pub direction: Option<String>,
    /// One entry per bit.
    #[serde(default)]
    pub bits: Vec<SignalBit>,
}

/// A named net.
#[derive(Debug, Default, Deserialize)]
pub struct RawNet {
    /// One entry per bit.
    #[serde(default)]
    pub bits: Vec<SignalBit>,
}

/// A cell instance.
#[derive(Debug, Default, Deserialize)]
pub struct RawCell {
    /// Primitive or module type.
    #[serde(rename = "type", default)]
    pub cell_type: String,
    /// Connection point to bits, in document order.
    #[serde(default)]
    pub connections: IndexMap<String, Vec<SignalBit>>,
}

impl NetlistDocument {
    /// Decodes a document from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_yosys_shape_in_document_order() {
        let doc = NetlistDocument::from_json(
            r#"{
              "creator": "Yosys 0.38",
              "modules": {
                "zeta": { "attributes": {"top": "1"}, "ports": {}, "cells": {}, "netnames": {} },
                "alpha": {
                  "ports": { "a": { "direction": "input", "bits": [2, 3] } },
                  "cells": { "$and$x": { "hide_name": 1, "type": "$and",
                              "connections": { "A": [2], "B": ["0"], "Y": [4] } } },
                  "netnames": { "a": { "hide_name": 0, "bits": [2, 3], "attributes": {} } }
                }
              }
            }"#,
        )
        .unwrap();
        let names: Vec<_> = doc.modules.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        let alpha = &doc.modules["alpha"];
        assert_eq!(alpha.ports["a"].bits.len(), 2);
        assert_eq!(alpha.cells["$and$x"].connections["B"], vec![SignalBit::Constant("0".into())]);
    }

    #[test]
    fn missing_sections_default_empty() {
        let doc = NetlistDocument::from_json(r#"{"modules": {"m": {}}}"#).unwrap();
        assert!(doc.modules["m"].ports.is_empty());
        assert!(NetlistDocument::from_json("{}").unwrap().modules.is_empty());
    }
}
