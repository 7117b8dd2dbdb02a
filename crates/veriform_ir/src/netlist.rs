//! Structural facts that only the netlist view provides.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named net.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Wire {
    /// Net name.
    pub name: String,
    /// Width in bits, at least 1.
    pub width: u32,
}

impl Wire {
    /// Creates a wire. Widths below 1 are raised to 1.
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width: width.max(1),
        }
    }
}

/// One bit of a cell connection: a net index, or a constant such as `"0"`, `"1"`, `"x"` or `"z"`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalBit {
    /// Net bit index.
    Net(u64),
    /// Constant driver.
    Constant(String),
}

/// A primitive or sub-module instance. Its connections are kept as found
/// and never interpreted.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Cell {
    /// Instance name.
    pub name: String,
    /// Primitive or module type, e.g. `$and` or `$dff`.
    #[serde(rename = "type")]
    pub cell_type: String,
    /// Connection point name to bits, in document order.
    #[serde(default)]
    pub connections: IndexMap<String, Vec<SignalBit>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_json_uses_type_key() {
        let json = r#"{"name":"$and$1","type":"$and","connections":{"Y":[5],"A":[2],"B":["1"]}}"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.cell_type, "$and");
        let keys: Vec<_> = cell.connections.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Y", "A", "B"]);
        assert_eq!(cell.connections["B"], vec![SignalBit::Constant("1".into())]);
        assert_eq!(serde_json::to_string(&cell).unwrap(), json);
    }

    #[test]
    fn wire_width_floor() {
        assert_eq!(Wire::new("n", 0).width, 1);
    }
}
