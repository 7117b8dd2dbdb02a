//! Lexer for VHDL source text.
//!
//! Produces a [`Token`] stream plus the spans of all line comments, which the
//! annotation scanner reads. Block comments are skipped. The lexer never
//! fails: bytes that start no token become [`VhdlToken::Error`] tokens, which
//! the recognizer simply steps over.

use crate::token::{lookup_keyword, Token, VhdlToken};
use veriform_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use veriform_source::{FileId, Span};

/// Tokens and comment trivia for one file.
#[derive(Debug, Default)]
pub struct Lexed {
    /// Tokens, always terminated by [`VhdlToken::Eof`].
    pub tokens: Vec<Token>,
    /// Line comments from the leading `--` up to, not including, the newline.
    pub comments: Vec<Span>,
}

/// Lexes `source`.
pub fn lex(source: &str, file: FileId, sink: &DiagnosticSink) -> Lexed {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        file,
        sink,
        comments: Vec::new(),
    };
    let tokens = lexer.lex_all();
    Lexed {
        tokens,
        comments: lexer.comments,
    }
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    file: FileId,
    sink: &'a DiagnosticSink,
    comments: Vec<Span>,
}

impl<'a> Lexer<'a> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            if self.pos >= self.source.len() {
                tokens.push(Token {
                    kind: VhdlToken::Eof,
                    span: self.span_from(self.pos),
                });
                return tokens;
            }
            tokens.push(self.next_token());
        }
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start as u32, self.pos as u32)
    }

    fn token(&self, kind: VhdlToken, start: usize) -> Token {
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_ascii_whitespace() && self.pos < self.source.len() {
                self.pos += 1;
            }
            if self.peek() == b'-' && self.peek_at(1) == b'-' {
                let start = self.pos;
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                let mut end = self.pos;
                if end > start && self.source[end - 1] == b'\r' {
                    end -= 1;
                }
                self.comments
                    .push(Span::new(self.file, start as u32, end as u32));
                continue;
            }
            if self.peek() == b'/' && self.peek_at(1) == b'*' {
                self.pos += 2;
                while self.pos < self.source.len()
                    && !(self.peek() == b'*' && self.peek_at(1) == b'/')
                {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.source.len());
                continue;
            }
            return;
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let b = self.peek();

        // 'x' is a character literal unless it is followed by a name
        // character, which makes the tick an attribute mark (clk'event).
        if b == b'\'' && self.peek_at(2) == b'\'' && !is_ident_char(self.peek_at(3)) {
            self.pos += 3;
            return self.token(VhdlToken::CharLiteral, start);
        }
        if is_ident_start(b) {
            return self.lex_word(start);
        }
        if b == b'\\' {
            return self.lex_extended_identifier(start);
        }
        if b.is_ascii_digit() {
            return self.lex_number(start);
        }
        if b == b'"' {
            return self.lex_string(start);
        }
        self.lex_punctuation(start)
    }

    fn lex_word(&mut self, start: usize) -> Token {
        while is_ident_char(self.peek()) {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];

        if self.peek() == b'"' && is_bit_string_prefix(text) {
            self.pos += 1;
            self.consume_quoted(start);
            return self.token(VhdlToken::BitStringLiteral, start);
        }

        let lower = String::from_utf8_lossy(text).to_ascii_lowercase();
        let kind = lookup_keyword(&lower).unwrap_or(VhdlToken::Identifier);
        self.token(kind, start)
    }

    fn lex_extended_identifier(&mut self, start: usize) -> Token {
        self.pos += 1;
        while self.pos < self.source.len() && self.peek() != b'\n' {
            if self.peek() == b'\\' {
                if self.peek_at(1) == b'\\' {
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                return self.token(VhdlToken::ExtendedIdentifier, start);
            }
            self.pos += 1;
        }
        self.token(VhdlToken::Error, start)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        self.eat_digits();
        if self.peek() == b'#' {
            self.pos += 1;
            while self.peek().is_ascii_hexdigit() || matches!(self.peek(), b'_' | b'.') {
                self.pos += 1;
            }
            if self.peek() != b'#' {
                return self.token(VhdlToken::Error, start);
            }
            self.pos += 1;
            self.eat_exponent();
            let kind = if self.source[start..self.pos].contains(&b'.') {
                VhdlToken::RealLiteral
            } else {
                VhdlToken::IntLiteral
            };
            return self.token(kind, start);
        }
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            self.pos += 1;
            self.eat_digits();
            self.eat_exponent();
            return self.token(VhdlToken::RealLiteral, start);
        }
        self.eat_exponent();
        self.token(VhdlToken::IntLiteral, start)
    }

    fn eat_digits(&mut self) {
        while self.peek().is_ascii_digit() || self.peek() == b'_' {
            self.pos += 1;
        }
    }

    fn eat_exponent(&mut self) {
        if matches!(self.peek(), b'e' | b'E')
            && (self.peek_at(1).is_ascii_digit()
                || (matches!(self.peek_at(1), b'+' | b'-') && self.peek_at(2).is_ascii_digit()))
        {
            self.pos += 2;
            self.eat_digits();
        }
    }

    fn lex_string(&mut self, start: usize) -> Token {
        self.pos += 1;
        self.consume_quoted(start);
        self.token(VhdlToken::StringLiteral, start)
    }

    /// Consumes up to and including the closing quote; `""` is an escaped quote.
    /// A string that reaches the end of its line is closed there with a warning.
    fn consume_quoted(&mut self, start: usize) {
        loop {
            if self.pos >= self.source.len() || matches!(self.peek(), b'\n' | b'\r') {
                self.sink.emit(Diagnostic::warning(
                    DiagnosticCode::UNTERMINATED_STRING,
                    "unterminated string literal",
                    self.span_from(start),
                ));
                return;
            }
            if self.peek() == b'"' {
                if self.peek_at(1) == b'"' {
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                return;
            }
            self.pos += 1;
        }
    }

    fn lex_punctuation(&mut self, start: usize) -> Token {
        let b = self.peek();
        self.pos += 1;
        let kind = match b {
            b'(' => VhdlToken::LeftParen,
            b')' => VhdlToken::RightParen,
            b',' => VhdlToken::Comma,
            b';' => VhdlToken::Semicolon,
            b'.' => VhdlToken::Dot,
            b'\'' => VhdlToken::Tick,
            b':' if self.peek() == b'=' => {
                self.pos += 1;
                VhdlToken::ColonEquals
            }
            b':' => VhdlToken::Colon,
            b'<' | b'>' | b'=' | b'/' | b'*' | b'?' => {
                if matches!(self.peek(), b'=' | b'>' | b'<' | b'*' | b'/' | b'?') {
                    self.pos += 1;
                }
                VhdlToken::Operator
            }
            b'+' | b'-' | b'&' | b'|' | b'^' | b'@' => VhdlToken::Operator,
            _ => {
                // Keep multi-byte characters whole so spans stay on char boundaries.
                while self.pos < self.source.len() && (self.peek() & 0xC0) == 0x80 {
                    self.pos += 1;
                }
                VhdlToken::Error
            }
        };
        self.token(kind, start)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_bit_string_prefix(text: &[u8]) -> bool {
    let lower = text.to_ascii_lowercase();
    matches!(
        lower.as_slice(),
        b"b" | b"o" | b"x" | b"d" | b"ub" | b"uo" | b"ux" | b"sb" | b"so" | b"sx"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_str(source: &str) -> (Lexed, DiagnosticSink) {
        let sink = DiagnosticSink::new();
        let lexed = lex(source, FileId::from_raw(0), &sink);
        (lexed, sink)
    }

    fn kinds(source: &str) -> Vec<VhdlToken> {
        lex_str(source).0.tokens.iter().map(|t| t.kind).collect()
    }

    fn text<'s>(source: &'s str, span: Span) -> &'s str {
        &source[span.start as usize..span.end as usize]
    }

    #[test]
    fn empty_input() {
        assert_eq!(kinds(""), vec![VhdlToken::Eof]);
        assert_eq!(kinds(" \t\r\n"), vec![VhdlToken::Eof]);
    }

    #[test]
    fn keywords_case_insensitive() {
        assert_eq!(
            kinds("ENTITY Entity is PORT"),
            vec![
                VhdlToken::Entity,
                VhdlToken::Entity,
                VhdlToken::Is,
                VhdlToken::Port,
                VhdlToken::Eof
            ]
        );
    }

    #[test]
    fn port_declaration() {
        use VhdlToken::*;
        assert_eq!(
            kinds("d : in std_logic_vector(7 downto 0) := (others => '0');"),
            vec![
                Identifier, Colon, In, Identifier, LeftParen, IntLiteral, Downto, IntLiteral,
                RightParen, ColonEquals, LeftParen, Identifier, Operator, CharLiteral,
                RightParen, Semicolon, Eof
            ]
        );
    }

    #[test]
    fn attribute_tick_versus_char_literal() {
        use VhdlToken::*;
        assert_eq!(
            kinds("clk'event and clk = '1'"),
            vec![Identifier, Tick, Identifier, Identifier, Identifier, Operator, CharLiteral, Eof]
        );
    }

    #[test]
    fn literals() {
        use VhdlToken::*;
        assert_eq!(
            kinds(r#"16#FF# 1_000 2.5e3 x"0F" "a""b" \odd name\"#),
            vec![
                IntLiteral, IntLiteral, RealLiteral, BitStringLiteral, StringLiteral,
                ExtendedIdentifier, Eof
            ]
        );
    }

    #[test]
    fn comments_become_trivia() {
        let src = "a <= b; -- @c2vhdl:ASSERT a = b;\r\n/* block -- not a line comment */ c";
        let (lexed, _) = lex_str(src);
        assert_eq!(lexed.comments.len(), 1);
        assert_eq!(text(src, lexed.comments[0]), "-- @c2vhdl:ASSERT a = b;");
        let last = lexed.tokens[lexed.tokens.len() - 2];
        assert_eq!(text(src, last.span), "c");
    }

    #[test]
    fn comment_inside_string_is_not_trivia() {
        let (lexed, _) = lex_str(r#"report "-- @c2vhdl:ASSERT x;";"#);
        assert!(lexed.comments.is_empty());
    }

    #[test]
    fn unterminated_string_warns() {
        let (lexed, sink) = lex_str("s := \"open\nnext");
        assert_eq!(sink.warning_count(), 1);
        assert_eq!(
            sink.diagnostics()[0].code,
            DiagnosticCode::UNTERMINATED_STRING
        );
        assert_eq!(lexed.tokens[2].kind, VhdlToken::StringLiteral);
        assert_eq!(lexed.tokens[3].kind, VhdlToken::Identifier);
    }

    #[test]
    fn non_ascii_is_single_error_token() {
        let src = "a é b";
        let (lexed, sink) = lex_str(src);
        assert_eq!(lexed.tokens[1].kind, VhdlToken::Error);
        assert_eq!(text(src, lexed.tokens[1].span), "é");
        assert!(!sink.has_errors());
    }
}
