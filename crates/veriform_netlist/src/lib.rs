//! Adapter from Yosys `write_json` netlists to the unified module form.
//!
//! [`NetlistDocument`] mirrors the parts of the Yosys JSON schema that matter
//! here, keeping every map in document order. [`netlist_to_ast`] picks a
//! module and converts its ports, nets and cells; [`load_netlist`] adds file
//! reading and decoding, which are the only hard failures.

#![warn(missing_docs)]

pub mod adapter;
pub mod document;
pub mod error;

pub use adapter::{load_netlist, netlist_to_ast};
pub use document::{NetlistDocument, RawCell, RawModule, RawNet, RawPort};
pub use error::NetlistError;
