//! The unified module representation.

use crate::netlist::{Cell, Wire};
use crate::port::{Port, PortDirection};
use crate::property::{Property, PropertyKind};
use crate::stats::{self, StatValue, Stats};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Schema tag written into every persisted document.
pub const SCHEMA_VERSION: &str = "veriform-ast-v1";

/// One design as seen by the RTL parser, the netlist adapter, or both.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ModuleAst {
    /// Schema tag, [`SCHEMA_VERSION`] for documents written by this crate.
    pub schema: String,
    /// Design name. Never empty.
    pub design_name: String,
    /// RTL file this module was parsed from.
    #[serde(default)]
    pub source_rtl: Option<PathBuf>,
    /// Netlist document this module was adapted from.
    #[serde(default)]
    pub source_netlist: Option<PathBuf>,
    /// Ports in declaration order.
    #[serde(default)]
    pub ports: Vec<Port>,
    /// Annotated properties in source order.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Named nets.
    #[serde(default)]
    pub wires: Vec<Wire>,
    /// Instances.
    #[serde(default)]
    pub cells: Vec<Cell>,
    /// Statistics, see [`crate::stats`] for the well-known keys.
    #[serde(default)]
    pub stats: Stats,
    /// Human-readable notes on anything that was guessed or skipped.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ModuleAst {
    /// Creates an empty module.
    pub fn new(design_name: impl Into<String>) -> Self {
        let design_name = design_name.into();
        debug_assert!(!design_name.is_empty(), "design name must not be empty");
        Self {
            schema: SCHEMA_VERSION.to_string(),
            design_name,
            source_rtl: None,
            source_netlist: None,
            ports: Vec::new(),
            properties: Vec::new(),
            wires: Vec::new(),
            cells: Vec::new(),
            stats: Stats::new(),
            notes: Vec::new(),
        }
    }

    /// Whether the RTL showed clocked behavior. Absent means `false`.
    pub fn has_clock(&self) -> bool {
        self.stats
            .get(stats::HAS_CLOCK)
            .and_then(StatValue::as_bool)
            .unwrap_or(false)
    }

    /// Records the clock flag.
    pub fn set_has_clock(&mut self, has_clock: bool) {
        self.stats.insert(stats::HAS_CLOCK.to_string(), has_clock.into());
    }

    /// The first 1-bit input named like a clock, in port order.
    pub fn clock_port(&self) -> Option<&Port> {
        self.ports.iter().find(|p| p.looks_like_clock())
    }

    /// Looks a port up by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Ports with the given direction, in declaration order.
    pub fn ports_with(&self, direction: PortDirection) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(move |p| p.direction == direction)
    }

    /// Properties of the given kind, in source order.
    pub fn properties_of(&self, kind: PropertyKind) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(move |p| p.kind == kind)
    }

    /// Appends a note.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Serializes to the pretty-printed document form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Reads a document produced by [`to_json`](Self::to_json).
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
