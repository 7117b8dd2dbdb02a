//! Structured diagnostic messages.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use veriform_source::Span;

/// One reported problem, with its code, location and supporting text.
///
/// Diagnostics that do not come from RTL text (netlist documents, file
/// writes) use [`Span::DUMMY`] and name the offending path in the message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Stable identifying code.
    pub code: DiagnosticCode,
    /// Main message.
    pub message: String,
    /// Where the problem was detected.
    pub primary_span: Span,
    /// Additional annotated spans.
    pub labels: Vec<Label>,
    /// `note:` footers.
    pub notes: Vec<String>,
    /// `help:` footers.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message, span)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message, span)
    }

    /// Creates a note diagnostic.
    pub fn note(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Note, code, message, span)
    }

    /// Adds a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note footer.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help footer.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let e = Diagnostic::error(DiagnosticCode::RTL_UNREADABLE, "cannot read", Span::DUMMY);
        let w = Diagnostic::warning(DiagnosticCode::NO_ENTITY, "no entity", Span::DUMMY);
        let n = Diagnostic::note(DiagnosticCode::NO_PORTS, "no ports", Span::DUMMY);
        assert_eq!(e.severity, Severity::Error);
        assert_eq!(w.severity, Severity::Warning);
        assert_eq!(n.severity, Severity::Note);
        assert_eq!(w.code.to_string(), "W101");
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning(
            DiagnosticCode::SKIPPED_PORT,
            "cannot parse port declaration",
            Span::DUMMY,
        )
        .with_label(Label::primary(Span::DUMMY, "expected ':'"))
        .with_note("the port is left out of the generated wrapper")
        .with_help("write one declaration per line");
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }
}
