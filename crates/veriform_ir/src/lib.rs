//! The unified design representation shared by every front end and generator.
//!
//! A [`ModuleAst`] is built by the RTL parser, the netlist adapter, or the
//! merge of both, and is the only input the artifact generators need. All of
//! its collections are plain `Vec`s and maps that default to empty, so a
//! document read back from disk never distinguishes "missing" from "empty".
//! [`DesignSpec`] is the generator-facing projection of a [`ModuleAst`].

#![warn(missing_docs)]

pub mod ident;
pub mod module_ast;
pub mod netlist;
pub mod port;
pub mod property;
pub mod spec;
pub mod stats;

pub use ident::{is_identifier, mangle_identifier};
pub use module_ast::{ModuleAst, SCHEMA_VERSION};
pub use netlist::{Cell, SignalBit, Wire};
pub use port::{Port, PortDirection};
pub use property::{Property, PropertyKind};
pub use spec::DesignSpec;
pub use stats::{StatValue, Stats};
