//! Property annotations embedded in line comments.
//!
//! ```vhdl
//! -- @c2vhdl:ASSUME rst = '0';
//! -- @c2vhdl:ASSERT y = x + 1 report "increment";
//! ```
//!
//! The tag and keyword are matched case-insensitively. One trailing `;` is
//! stripped, as is an optional trailing `report "<message>"`. The expression
//! itself is copied verbatim and never parsed.

use veriform_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Label};
use veriform_ir::{Property, PropertyKind};
use veriform_source::{SourceFile, Span};

/// The marker that introduces an annotation inside a comment.
pub const TAG: &str = "@c2vhdl:";

/// Scans comment spans for annotations, in source order.
///
/// Annotations with an empty expression are dropped with a warning.
pub fn extract_properties(file: &SourceFile, comments: &[Span], sink: &DiagnosticSink) -> Vec<Property> {
    let mut properties = Vec::new();
    for &span in comments {
        let comment = file.snippet(span.start, span.end);
        let Some((kind, body)) = split_annotation(comment) else {
            continue;
        };
        let (expr, msg) = split_report(body);
        if expr.is_empty() {
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::EMPTY_ANNOTATION,
                    format!("{kind} annotation has no expression"),
                    span,
                )
                .with_label(Label::primary(span, "nothing to check"))
                .with_note("the annotation is ignored"),
            );
            continue;
        }
        let mut property = Property::new(kind, expr).at_line(file.line_of(span.start));
        if let Some(msg) = msg {
            property = property.with_msg(msg);
        }
        properties.push(property);
    }
    properties
}

/// Splits `-- @c2vhdl:KIND rest` into its kind and the text after the keyword.
fn split_annotation(comment: &str) -> Option<(PropertyKind, &str)> {
    let rest = comment.strip_prefix("--")?.trim_start();
    let rest = strip_prefix_ignore_case(rest, TAG)?;
    for (word, kind) in [("assume", PropertyKind::Assume), ("assert", PropertyKind::Assert)] {
        if let Some(after) = strip_prefix_ignore_case(rest, word) {
            let boundary = after
                .chars()
                .next()
                .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_'));
            if boundary {
                return Some((kind, after));
            }
        }
    }
    None
}

/// Separates the expression from an optional trailing `report "..."`.
fn split_report(body: &str) -> (&str, Option<String>) {
    let body = body.trim();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();

    if let Some(quoted) = trailing_string(body) {
        let before = body[..body.len() - quoted.len()].trim_end();
        let split_at = before.len().saturating_sub(6);
        let keyword = before.get(split_at..).filter(|_| before.len() >= 6);
        if keyword.is_some_and(|k| k.eq_ignore_ascii_case("report")) {
            let head = &before[..split_at];
            let at_boundary = head
                .chars()
                .last()
                .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_'));
            if at_boundary {
                let expr = head.trim_end();
                let inner = &quoted[1..quoted.len() - 1];
                return (expr, Some(inner.replace("\"\"", "\"")));
            }
        }
    }
    (body, None)
}

/// Returns the `"..."` literal that ends `text`, quotes included.
fn trailing_string(text: &str) -> Option<&str> {
    if !text.ends_with('"') || text.len() < 2 {
        return None;
    }
    let bytes = text.as_bytes();
    let mut i = bytes.len() - 1;
    loop {
        let open = text[..i].rfind('"')?;
        // `""` inside a literal is an escaped quote; keep walking left.
        if open > 0 && bytes[open - 1] == b'"' {
            i = open - 1;
            continue;
        }
        return Some(&text[open..]);
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use veriform_source::SourceDb;

    fn props(src: &str) -> (Vec<Property>, DiagnosticSink) {
        let mut db = SourceDb::new();
        let id = db.add_source("t.vhd", src.to_string());
        let sink = DiagnosticSink::new();
        let lexed = lex(src, id, &sink);
        let props = extract_properties(db.get_file(id), &lexed.comments, &sink);
        (props, sink)
    }

    #[test]
    fn assert_with_semicolon() {
        let (p, _) = props("-- @c2vhdl:ASSERT y = x + 1;\n");
        assert_eq!(p.len(), 1);
        assert_eq!(p[0].kind, PropertyKind::Assert);
        assert_eq!(p[0].expr, "y = x + 1");
        assert_eq!(p[0].source_line, Some(1));
        assert_eq!(p[0].msg, None);
    }

    #[test]
    fn case_insensitive_and_optional_semicolon() {
        let (p, _) = props("a;\n  --@C2VHDL:assume rst = '0'\n");
        assert_eq!(p[0].kind, PropertyKind::Assume);
        assert_eq!(p[0].expr, "rst = '0'");
        assert_eq!(p[0].source_line, Some(2));
    }

    #[test]
    fn trailing_comment_after_code() {
        let (p, _) = props("q <= d; -- @c2vhdl:ASSERT q == $past(d) ;\n");
        assert_eq!(p[0].expr, "q == $past(d)");
    }

    #[test]
    fn report_message() {
        let (p, _) = props("-- @c2vhdl:ASSERT cnt < 10 report \"count \"\"overflow\"\"\";");
        assert_eq!(p[0].expr, "cnt < 10");
        assert_eq!(p[0].msg.as_deref(), Some("count \"overflow\""));
    }

    #[test]
    fn report_needs_word_boundary() {
        let (p, _) = props("-- @c2vhdl:ASSERT myreport \"x\";");
        assert_eq!(p[0].expr, "myreport \"x\"");
        assert_eq!(p[0].msg, None);
    }

    #[test]
    fn empty_expression_skipped_with_warning() {
        let (p, sink) = props("-- @c2vhdl:ASSERT ;\n-- @c2vhdl:ASSUME\n");
        assert!(p.is_empty());
        assert_eq!(sink.warning_count(), 2);
        assert!(!sink.has_errors());
    }

    #[test]
    fn unknown_keyword_or_glued_word_ignored() {
        let (p, sink) = props("-- @c2vhdl:COVER a;\n-- @c2vhdl:ASSERTION a;\n-- plain comment\n");
        assert!(p.is_empty());
        assert_eq!(sink.warning_count(), 0);
    }

    #[test]
    fn tag_in_string_literal_ignored() {
        let (p, _) = props("report \"-- @c2vhdl:ASSERT a;\";\n");
        assert!(p.is_empty());
    }

    #[test]
    fn order_is_source_order() {
        let (p, _) = props("-- @c2vhdl:ASSERT a;\n-- @c2vhdl:ASSUME b;\n-- @c2vhdl:ASSERT c;\n");
        let exprs: Vec<_> = p.iter().map(|p| p.expr.as_str()).collect();
        assert_eq!(exprs, ["a", "b", "c"]);
    }
}
