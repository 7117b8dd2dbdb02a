//! Diagnostics for the front ends and generators.
//!
//! Parsing and adaptation never abort on malformed input; instead they emit
//! [`Diagnostic`]s into a shared [`DiagnosticSink`] and keep going. The
//! [`TerminalRenderer`] and [`JsonRenderer`] turn the collected diagnostics
//! into rustc-style text or one JSON object per line.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
