//! Recursive-descent recognizer for the declaration subset.
//!
//! The recognizer walks the token stream looking for three things: the first
//! `entity <name> is` header and its `port ( ... );` clause, a whole-file
//! scan for port-shaped declarations when no clause exists, and clock idioms
//! (`rising_edge(`, `falling_edge(`, a process sensitive to `clk`). Anything
//! else in the file is stepped over without interpretation.

use crate::token::{Token, VhdlToken};
use crate::width::infer_width;
use tracing::debug;
use veriform_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Label};
use veriform_ir::{mangle_identifier, Port, PortDirection};
use veriform_source::Span;

/// The entity header that named the design.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityHeader {
    /// Entity name as written.
    pub name: String,
    /// Span of the name.
    pub span: Span,
}

/// Where the ports came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortSource {
    /// The entity's own port clause.
    PortClause,
    /// No clause was found; declarations were collected from the whole file.
    FileScan,
}

/// What the recognizer found in one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignOutline {
    /// First entity header, if any.
    pub entity: Option<EntityHeader>,
    /// Ports in declaration order, names unique.
    pub ports: Vec<Port>,
    /// How the ports were found.
    pub port_source: PortSource,
    /// Whether a clock edge or clock-sensitive process appears.
    pub has_clock: bool,
}

/// Token-level recognizer. See the module docs.
pub struct RtlParser<'src> {
    tokens: &'src [Token],
    pos: usize,
    source: &'src str,
    sink: &'src DiagnosticSink,
}

impl<'src> RtlParser<'src> {
    /// Creates a recognizer over a token stream ending in [`VhdlToken::Eof`].
    pub fn new(tokens: &'src [Token], source: &'src str, sink: &'src DiagnosticSink) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            sink,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> VhdlToken {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn current_text(&self) -> &'src str {
        self.text(&self.tokens[self.pos])
    }

    fn text(&self, token: &Token) -> &'src str {
        &self.source[token.span.start as usize..token.span.end as usize]
    }

    fn at(&self, kind: VhdlToken) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.at(VhdlToken::Eof)
    }

    fn peek_is(&self, kind: VhdlToken) -> bool {
        self.tokens
            .get(self.pos + 1)
            .is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: VhdlToken) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips a parenthesized group starting at the current `(`.
    fn skip_parens(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                VhdlToken::LeftParen => depth += 1,
                VhdlToken::RightParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                VhdlToken::Eof => return,
                _ => {}
            }
            self.advance();
        }
    }

    /// Advances to the next `;` or unbalanced `)` at nesting depth zero,
    /// without consuming it.
    fn skip_to_decl_end(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                VhdlToken::LeftParen => depth += 1,
                VhdlToken::RightParen if depth == 0 => return,
                VhdlToken::RightParen => depth -= 1,
                VhdlToken::Semicolon if depth == 0 => return,
                VhdlToken::Eof => return,
                _ => {}
            }
            self.advance();
        }
    }

    /// The current name token's text, with extended identifiers made plain.
    fn current_name(&self) -> String {
        let raw = self.current_text();
        if self.at(VhdlToken::ExtendedIdentifier) {
            mangle_identifier(raw)
        } else {
            raw.to_string()
        }
    }

    /// Warns about a name that was rewritten, if the token at `span` was an
    /// extended identifier.
    fn report_renamed(&self, name: &str, span: Span) {
        let raw = &self.source[span.start as usize..span.end as usize];
        if !raw.starts_with('\\') {
            return;
        }
        self.sink.emit(
            Diagnostic::warning(
                DiagnosticCode::EXTENDED_IDENTIFIER,
                format!("extended identifier {raw} renamed to '{name}'"),
                span,
            )
            .with_label(Label::primary(span, "not a plain identifier"))
            .with_note("generated SystemVerilog and C code only accepts plain identifiers"),
        );
    }

    fn skipped_port(&self, message: impl Into<String>, span: Span) {
        self.sink.emit(
            Diagnostic::warning(DiagnosticCode::SKIPPED_PORT, message, span)
                .with_label(Label::primary(span, "not understood"))
                .with_note("the declaration is left out of the design's ports"),
        );
    }

    // ========================================================================
    // Top level
    // ========================================================================

    /// Runs every recognizer pass over the token stream.
    pub fn parse_outline(&mut self) -> DesignOutline {
        let has_clock = self.detect_clock();

        self.pos = 0;
        let entity = self.find_entity();
        let clause = match &entity {
            Some(_) => self.parse_entity_header(),
            None => None,
        };

        let (ports, port_source) = match clause {
            Some(ports) => (ports, PortSource::PortClause),
            None => {
                self.pos = 0;
                (self.scan_port_declarations(), PortSource::FileScan)
            }
        };

        debug!(
            entity = entity.as_ref().map(|e| e.name.as_str()),
            ports = ports.len(),
            ?port_source,
            has_clock,
            "recognized design outline"
        );
        DesignOutline {
            entity,
            ports,
            port_source,
            has_clock,
        }
    }

    /// Positions after the first `entity <name> is` and returns the header.
    fn find_entity(&mut self) -> Option<EntityHeader> {
        while !self.at_eof() {
            if self.at(VhdlToken::Entity) {
                self.advance();
                if self.current().is_name() && self.peek_is(VhdlToken::Is) {
                    let header = EntityHeader {
                        name: self.current_name(),
                        span: self.current_span(),
                    };
                    self.report_renamed(&header.name, header.span);
                    self.advance();
                    self.advance();
                    return Some(header);
                }
                continue;
            }
            self.advance();
        }
        None
    }

    /// Parses `[generic ( ... );] [port ( ... );]` after `entity <name> is`.
    /// Returns `None` when the entity has no port clause.
    fn parse_entity_header(&mut self) -> Option<Vec<Port>> {
        if self.eat(VhdlToken::Generic) {
            if self.at(VhdlToken::LeftParen) {
                self.skip_parens();
            }
            self.eat(VhdlToken::Semicolon);
        }
        if self.at(VhdlToken::Port) && self.peek_is(VhdlToken::LeftParen) {
            self.advance();
            return Some(self.parse_port_clause());
        }
        None
    }

    // ========================================================================
    // Port clause
    // ========================================================================

    /// Parses `( interface_decl { ; interface_decl } ) ;` from the current `(`.
    fn parse_port_clause(&mut self) -> Vec<Port> {
        self.eat(VhdlToken::LeftParen);
        let mut ports: Vec<Port> = Vec::new();
        let mut name_spans: Vec<Span> = Vec::new();
        loop {
            if self.at(VhdlToken::RightParen) || self.at_eof() {
                break;
            }
            let start = self.pos;
            match self.parse_interface_decl(true) {
                Some(decl) => {
                    for (port, span) in decl {
                        self.report_renamed(&port.name, span);
                        let first = ports
                            .iter()
                            .position(|p| p.name.eq_ignore_ascii_case(&port.name));
                        match first {
                            Some(i) => self.sink.emit(
                                Diagnostic::warning(
                                    DiagnosticCode::SKIPPED_PORT,
                                    format!("duplicate port '{}'", port.name),
                                    span,
                                )
                                .with_label(Label::primary(span, "declared again"))
                                .with_label(Label::secondary(name_spans[i], "first declared here"))
                                .with_note("the first declaration is kept"),
                            ),
                            None => {
                                ports.push(port);
                                name_spans.push(span);
                            }
                        }
                    }
                }
                None => {
                    self.pos = start;
                    self.skip_to_decl_end();
                    let end = self.tokens[self.pos.saturating_sub(1).max(start)].span;
                    self.skipped_port(
                        "cannot parse port declaration",
                        self.tokens[start].span.to(end),
                    );
                }
            }
            if !self.eat(VhdlToken::Semicolon) {
                break;
            }
        }
        self.eat(VhdlToken::RightParen);
        self.eat(VhdlToken::Semicolon);
        ports
    }

    /// Parses `[signal] name {, name} : [mode] subtype [:= default]`.
    ///
    /// Stops before the terminating `;` or `)`. With `mode_optional`, a
    /// missing mode means `in`, as in VHDL; otherwise a mode is required.
    /// Each port comes with the span of its name.
    fn parse_interface_decl(&mut self, mode_optional: bool) -> Option<Vec<(Port, Span)>> {
        self.eat(VhdlToken::Signal);

        let mut names = Vec::new();
        loop {
            if !self.current().is_name() {
                return None;
            }
            names.push((self.current_name(), self.current_span()));
            self.advance();
            if !self.eat(VhdlToken::Comma) {
                break;
            }
        }
        if !self.eat(VhdlToken::Colon) {
            return None;
        }

        let direction = if self.current().is_mode() {
            let direction = PortDirection::from_keyword(self.current_text())?;
            self.advance();
            direction
        } else if mode_optional {
            PortDirection::In
        } else {
            return None;
        };

        let type_start = self.pos;
        let mut depth = 0usize;
        loop {
            match self.current() {
                VhdlToken::LeftParen => depth += 1,
                VhdlToken::RightParen if depth == 0 => break,
                VhdlToken::RightParen => depth -= 1,
                VhdlToken::Semicolon | VhdlToken::ColonEquals if depth == 0 => break,
                VhdlToken::Eof => break,
                _ => {}
            }
            self.advance();
        }
        let ty = &self.tokens[type_start..self.pos];
        if ty.is_empty() {
            return None;
        }
        if self.eat(VhdlToken::ColonEquals) {
            self.skip_to_decl_end();
        }

        let width = infer_width(ty, self.source);
        let source_type = normalize_type_text(self.source, ty);
        Some(
            names
                .into_iter()
                .map(|(name, span)| {
                    let port = Port::new(name, direction, width).with_source_type(source_type.clone());
                    (port, span)
                })
                .collect(),
        )
    }

    // ========================================================================
    // Fallback scan
    // ========================================================================

    /// Collects every `name {, name} : <mode> <type>` declaration in the file.
    /// A mode is required, which keeps signal and variable declarations out.
    fn scan_port_declarations(&mut self) -> Vec<Port> {
        let mut ports: Vec<Port> = Vec::new();
        while !self.at_eof() {
            if !self.current().is_name() {
                self.advance();
                continue;
            }
            let start = self.pos;
            match self.parse_interface_decl(false) {
                Some(decl) if matches!(self.current(), VhdlToken::Semicolon | VhdlToken::RightParen) => {
                    for (port, span) in decl {
                        if !ports.iter().any(|p| p.name.eq_ignore_ascii_case(&port.name)) {
                            self.report_renamed(&port.name, span);
                            ports.push(port);
                        }
                    }
                    self.advance();
                }
                _ => {
                    self.pos = start;
                    self.advance();
                }
            }
        }
        ports
    }

    // ========================================================================
    // Clock detection
    // ========================================================================

    fn detect_clock(&mut self) -> bool {
        self.pos = 0;
        while !self.at_eof() {
            match self.current() {
                VhdlToken::Identifier if self.peek_is(VhdlToken::LeftParen) => {
                    let word = self.current_text();
                    if word.eq_ignore_ascii_case("rising_edge")
                        || word.eq_ignore_ascii_case("falling_edge")
                    {
                        return true;
                    }
                }
                VhdlToken::Process if self.peek_is(VhdlToken::LeftParen) => {
                    self.advance();
                    if self.sensitivity_mentions_clk() {
                        return true;
                    }
                    continue;
                }
                _ => {}
            }
            self.advance();
        }
        false
    }

    /// Consumes a sensitivity list and reports whether `clk` appears in it.
    fn sensitivity_mentions_clk(&mut self) -> bool {
        let mut found = false;
        self.advance();
        while !self.at_eof() && !self.at(VhdlToken::RightParen) {
            if self.at(VhdlToken::Identifier) && self.current_text().eq_ignore_ascii_case("clk") {
                found = true;
            }
            self.advance();
        }
        self.eat(VhdlToken::RightParen);
        found
    }
}

/// The type's source text with runs of whitespace collapsed to one space.
fn normalize_type_text(source: &str, ty: &[Token]) -> String {
    let (Some(first), Some(last)) = (ty.first(), ty.last()) else {
        return String::new();
    };
    let span = first.span.to(last.span);
    source[span.start as usize..span.end as usize]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
