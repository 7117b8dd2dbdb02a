//! Design ports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a port as seen from inside the design.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// Driven from outside.
    #[serde(alias = "input")]
    In,
    /// Driven by the design.
    #[serde(alias = "output")]
    Out,
    /// Bidirectional.
    Inout,
}

impl PortDirection {
    /// Maps a VHDL mode or Yosys direction string onto a direction.
    ///
    /// VHDL `buffer` behaves as an output for verification purposes.
    /// `linkage` and unknown words yield `None`.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "in" | "input" => Some(Self::In),
            "out" | "output" | "buffer" => Some(Self::Out),
            "inout" => Some(Self::Inout),
            _ => None,
        }
    }

    /// The IR spelling: `in`, `out` or `inout`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Inout => "inout",
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named port with a direction and a bit width of at least 1.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Port {
    /// Port name, unique within its module.
    pub name: String,
    /// Direction.
    pub direction: PortDirection,
    /// The type as written in the source, kept for diagnostics only.
    #[serde(default)]
    pub source_type: String,
    /// Width in bits.
    pub width: u32,
}

impl Port {
    /// Creates a port with no recorded source type. Widths below 1 are raised to 1.
    pub fn new(name: impl Into<String>, direction: PortDirection, width: u32) -> Self {
        Self {
            name: name.into(),
            direction,
            source_type: String::new(),
            width: width.max(1),
        }
    }

    /// Records the source type text.
    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = source_type.into();
        self
    }

    /// Index of the most significant bit.
    pub fn msb(&self) -> u32 {
        self.width - 1
    }

    /// Returns `true` for a 1-bit input whose name contains `clk` or `clock`.
    pub fn looks_like_clock(&self) -> bool {
        if self.direction != PortDirection::In || self.width != 1 {
            return false;
        }
        let name = self.name.to_ascii_lowercase();
        name.contains("clk") || name.contains("clock")
    }
}
