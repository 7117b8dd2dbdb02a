//! Assume/assert properties taken from RTL annotations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a property constrains the environment or is a proof obligation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Constraint on inputs.
    Assume,
    /// Obligation to prove.
    Assert,
}

impl PropertyKind {
    /// Lowercase keyword, also the SystemVerilog statement name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assume => "assume",
            Self::Assert => "assert",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One annotated property. The expression is never interpreted, only copied.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Property {
    /// Assume or assert.
    pub kind: PropertyKind,
    /// Expression text, copied verbatim into the generated artifacts.
    pub expr: String,
    /// Optional message from a trailing `report "..."`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// 1-based line of the annotation in the RTL source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<u32>,
}

impl Property {
    /// Creates a property with no message or line.
    pub fn new(kind: PropertyKind, expr: impl Into<String>) -> Self {
        Self {
            kind,
            expr: expr.into(),
            msg: None,
            source_line: None,
        }
    }

    /// Records the annotation line.
    pub fn at_line(mut self, line: u32) -> Self {
        self.source_line = Some(line);
        self
    }

    /// Records a message.
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }
}
