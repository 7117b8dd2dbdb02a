//! Text and JSON rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use serde::Serialize;
use veriform_source::{SourceDb, Span};

/// Formats a diagnostic into a string.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Rustc-style text output:
///
/// ```text
/// warning[W104]: annotation has no expression
///   --> rtl/fifo.vhd:12:5
///    |
/// 12 |     -- @c2vhdl:ASSERT ;
///    |     ^^^^^^^^^^^^^^^^^^^
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Emit ANSI colors for the severity header.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return head;
        }
        let ansi = match diag.severity {
            crate::Severity::Error => "\x1b[1;31m",
            crate::Severity::Warning => "\x1b[1;33m",
            crate::Severity::Note => "\x1b[1;36m",
        };
        format!("{ansi}{head}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}: {}\n", self.header(diag), diag.message));

        if !diag.primary_span.is_dummy() {
            let label = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map_or("", |l| l.message.as_str());
            out.push_str(&format!("  --> {}\n", source_db.resolve_span(diag.primary_span)));
            push_snippet(&mut out, source_db, diag.primary_span, '^', label);
        }
        for label in &diag.labels {
            if label.style != LabelStyle::Secondary || label.span.is_dummy() {
                continue;
            }
            out.push_str(&format!("  ::: {}\n", source_db.resolve_span(label.span)));
            push_snippet(&mut out, source_db, label.span, '-', &label.message);
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

/// Appends the source line holding `span.start`, underlined with `marker`.
fn push_snippet(out: &mut String, source_db: &SourceDb, span: Span, marker: char, label: &str) {
    let file = source_db.get_file(span.file);
    let (line, col) = file.line_col(span.start);
    let line_num = line.to_string();
    let gutter = " ".repeat(line_num.len());
    let line_text = source_line(&file.content, span.start);

    // Underline at most to the end of the first line.
    let room = line_text.len().saturating_sub(col as usize - 1).max(1);
    let width = (span.len() as usize).clamp(1, room);
    let label = if label.is_empty() {
        String::new()
    } else {
        format!(" {label}")
    };

    out.push_str(&format!("{gutter} |\n"));
    out.push_str(&format!("{line_num} | {line_text}\n"));
    out.push_str(&format!(
        "{gutter} | {}{}{label}\n",
        " ".repeat(col as usize - 1),
        marker.to_string().repeat(width)
    ));
}

/// One JSON object per diagnostic, with the location already resolved.
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    severity: crate::Severity,
    code: String,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    notes: &'a [String],
}

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let resolved =
            (!diag.primary_span.is_dummy()).then(|| source_db.resolve_span(diag.primary_span));
        let record = JsonDiagnostic {
            severity: diag.severity,
            code: diag.code.to_string(),
            message: &diag.message,
            file: resolved
                .as_ref()
                .map(|r| r.file_path.display().to_string()),
            line: resolved.as_ref().map(|r| r.start_line),
            column: resolved.as_ref().map(|r| r.start_col),
            notes: &diag.notes,
        };
        serde_json::to_string(&record).unwrap_or_default()
    }
}

fn source_line(content: &str, byte_offset: u32) -> &str {
    let offset = byte_offset as usize;
    let start = content[..offset].rfind('\n').map_or(0, |pos| pos + 1);
    let end = content[offset..]
        .find('\n')
        .map_or(content.len(), |pos| offset + pos);
    content[start..end].trim_end_matches('\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;
    use crate::label::Label;
    use veriform_source::Span;

    fn db_with_annotation() -> (SourceDb, Span) {
        let mut db = SourceDb::new();
        let id = db.add_source(
            "fifo.vhd",
            "begin\n    -- @c2vhdl:ASSERT ;\nend;\n".to_string(),
        );
        (db, Span::new(id, 10, 29))
    }

    #[test]
    fn terminal_with_span() {
        let (db, span) = db_with_annotation();
        let diag = Diagnostic::warning(DiagnosticCode::EMPTY_ANNOTATION, "annotation has no expression", span)
            .with_label(Label::primary(span, "nothing to check"));
        let out = TerminalRenderer::new(false).render(&diag, &db);

        assert!(out.starts_with("warning[W104]: annotation has no expression\n"));
        assert!(out.contains("--> fifo.vhd:2:5"));
        assert!(out.contains("2 |     -- @c2vhdl:ASSERT ;"));
        assert!(out.contains(&format!("|     {} nothing to check", "^".repeat(19))));
    }

    #[test]
    fn terminal_secondary_label() {
        let mut db = SourceDb::new();
        let id = db.add_source(
            "dup.vhd",
            "port (\n  a : in bit;\n  A : out bit\n);\n".to_string(),
        );
        let first = Span::new(id, 9, 10);
        let again = Span::new(id, 23, 24);
        let diag = Diagnostic::warning(DiagnosticCode::SKIPPED_PORT, "duplicate port 'A'", again)
            .with_label(Label::primary(again, "declared again"))
            .with_label(Label::secondary(first, "first declared here"));
        let out = TerminalRenderer::new(false).render(&diag, &db);

        assert!(out.contains("  --> dup.vhd:3:3\n"));
        assert!(out.contains("3 |   A : out bit\n  |   ^ declared again\n"));
        assert!(out.contains("  ::: dup.vhd:2:3\n"));
        assert!(out.contains("2 |   a : in bit;\n  |   - first declared here\n"));
    }

    #[test]
    fn terminal_dummy_span_has_no_location() {
        let db = SourceDb::new();
        let diag = Diagnostic::warning(DiagnosticCode::NO_MODULES, "no modules in netlist", Span::DUMMY)
            .with_note("the netlist view contributes nothing")
            .with_help("check the yosys write_json step");
        let out = TerminalRenderer::new(false).render(&diag, &db);

        assert!(!out.contains("-->"));
        assert!(out.contains("= note: the netlist view contributes nothing"));
        assert!(out.contains("= help: check the yosys write_json step"));
    }

    #[test]
    fn terminal_color_wraps_header() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(DiagnosticCode::RTL_UNREADABLE, "x", Span::DUMMY);
        let out = TerminalRenderer::new(true).render(&diag, &db);
        assert!(out.starts_with("\x1b[1;31merror[E101]\x1b[0m: x"));
    }

    #[test]
    fn json_resolves_location() {
        let (db, span) = db_with_annotation();
        let diag = Diagnostic::warning(DiagnosticCode::EMPTY_ANNOTATION, "empty", span);
        let line = JsonRenderer.render(&diag, &db);
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["severity"], "warning");
        assert_eq!(v["code"], "W104");
        assert_eq!(v["file"], "fifo.vhd");
        assert_eq!(v["line"], 2);
        assert!(v.get("notes").is_none());
    }
}
