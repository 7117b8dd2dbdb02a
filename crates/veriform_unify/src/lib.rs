//! Merging of the RTL and netlist views of one design.
//!
//! The two views disagree in predictable ways: only the RTL carries property
//! annotations, only the netlist carries wires and cells, and where both
//! declare a port the elaborated netlist is trusted for width and direction.
//! [`merge`] encodes those rules; [`unify`] also handles a missing view.

#![warn(missing_docs)]

pub mod merge;

pub use merge::{merge, merge_by_name, Precedence};

use veriform_diagnostics::DiagnosticSink;
use veriform_ir::ModuleAst;

/// Raised when there is nothing to unify.
#[derive(Debug, thiserror::Error)]
pub enum UnifyError {
    /// Neither an RTL nor a netlist module was supplied.
    #[error("no sources: provide an RTL file, a netlist, or both")]
    NoSources,
}

/// Combines whichever views are available into one module.
pub fn unify(
    rtl: Option<ModuleAst>,
    netlist: Option<ModuleAst>,
    sink: &DiagnosticSink,
) -> Result<ModuleAst, UnifyError> {
    match (rtl, netlist) {
        (Some(rtl), Some(netlist)) => Ok(merge(&rtl, &netlist, sink)),
        (Some(only), None) | (None, Some(only)) => Ok(only),
        (None, None) => Err(UnifyError::NoSources),
    }
}
