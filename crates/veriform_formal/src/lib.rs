//! Generators for formal-verification artifacts.
//!
//! Each generator consumes a [`DesignSpec`](veriform_ir::DesignSpec) and
//! returns the artifact text; nothing here touches the filesystem except
//! [`write_artifact`], which places generated text on disk atomically.
//!
//! - [`wrapper`]: SystemVerilog shell with `assume`/`assert` blocks.
//! - [`proof_config`]: SymbiYosys `.sby` script.
//! - [`harness`]: C scaffold for a bounded model checker.
//!
//! [`generate_bundle`] renders all three with names taken from the project
//! configuration.

#![warn(missing_docs)]

pub mod artifact;
pub mod bundle;
pub mod harness;
pub mod proof_config;
pub mod wrapper;

pub use artifact::{write_artifact, ArtifactError, WriteOutcome};
pub use bundle::{generate_bundle, Artifact, ArtifactBundle};
pub use harness::{generate_harness, harness_file_name, CType};
pub use proof_config::{elaborated_file_name, generate_sby, sby_file_name, ProofMode, SbyInputs};
pub use wrapper::{generate_wrapper, is_sequential, wrapper_file_name, wrapper_module_name};
