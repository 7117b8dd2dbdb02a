//! Free-form statistics attached to a module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistic map in insertion order. Front ends insert in a fixed order, so
/// documents are stable across runs.
pub type Stats = IndexMap<String, StatValue>;

/// `true` when the RTL contains a clock edge or a clock-sensitive process.
pub const HAS_CLOCK: &str = "has_clock";
/// Module picked from the netlist document.
pub const YOSYS_TOP: &str = "yosys_top";
/// Number of cells in the netlist module.
pub const CELL_COUNT: &str = "cell_count";
/// Number of named nets in the netlist module.
pub const WIRE_COUNT: &str = "wire_count";

/// A statistic value.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    /// Flag.
    Bool(bool),
    /// Count.
    Int(i64),
    /// Name or other text.
    Text(String),
    /// Any other JSON value, kept as read.
    Other(serde_json::Value),
}

impl StatValue {
    /// Returns the flag, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

}

impl From<bool> for StatValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<usize> for StatValue {
    fn from(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for StatValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for StatValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json() {
        let mut stats = Stats::new();
        stats.insert(HAS_CLOCK.into(), true.into());
        stats.insert(CELL_COUNT.into(), 12usize.into());
        stats.insert(YOSYS_TOP.into(), "alu".into());
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"has_clock":true,"cell_count":12,"yosys_top":"alu"}"#);
        let back: Stats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn free_form_values_are_kept() {
        let stats: Stats =
            serde_json::from_str(r#"{"util": 0.75, "origin": null, "tags": ["a"]}"#).unwrap();
        assert_eq!(stats["util"], StatValue::Other(serde_json::json!(0.75)));
        assert_eq!(stats["origin"], StatValue::Other(serde_json::Value::Null));
        assert_eq!(stats["tags"].to_string(), r#"["a"]"#);
        let keys: Vec<_> = stats.keys().map(String::as_str).collect();
        assert_eq!(keys, ["util", "origin", "tags"]);
        let back: Stats = serde_json::from_str(&serde_json::to_string(&stats).unwrap()).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn accessors() {
        assert_eq!(StatValue::Bool(true).as_bool(), Some(true));
        assert_eq!(StatValue::Int(3).as_bool(), None);
        assert_eq!(StatValue::from("x").to_string(), "x");
    }
}
