//! Token kinds for the declaration-level VHDL lexer.
//!
//! Only the reserved words the recognizer acts on get their own kind; every
//! other reserved word lexes as [`VhdlToken::Identifier`], which is harmless
//! because the recognizer never interprets statement bodies.

use veriform_source::Span;

/// A token kind. Literal values are read back from the source via the span.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum VhdlToken {
    // === Keywords ===
    /// `all`
    All,
    /// `architecture`
    Architecture,
    /// `begin`
    Begin,
    /// `buffer`
    Buffer,
    /// `constant`
    Constant,
    /// `downto`
    Downto,
    /// `end`
    End,
    /// `entity`
    Entity,
    /// `generic`
    Generic,
    /// `in`
    In,
    /// `inout`
    Inout,
    /// `is`
    Is,
    /// `linkage`
    Linkage,
    /// `of`
    Of,
    /// `out`
    Out,
    /// `port`
    Port,
    /// `process`
    Process,
    /// `range`
    Range,
    /// `signal`
    Signal,
    /// `to`
    To,
    /// `variable`
    Variable,

    // === Names and literals ===
    /// Basic identifier, or any reserved word without its own kind.
    Identifier,
    /// `\extended identifier\`
    ExtendedIdentifier,
    /// Decimal or based integer, e.g. `255`, `1_000`, `16#FF#`.
    IntLiteral,
    /// Real literal, e.g. `1.5e3`.
    RealLiteral,
    /// `"text"`
    StringLiteral,
    /// `'0'`
    CharLiteral,
    /// `x"FF"`, `b"1010"`
    BitStringLiteral,

    // === Punctuation ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `:=`
    ColonEquals,
    /// `'` used for attributes
    Tick,
    /// `.`
    Dot,
    /// Any operator the recognizer does not distinguish (`<=`, `+`, `=>`, ...).
    Operator,

    /// A byte that starts no VHDL token.
    Error,
    /// End of input.
    Eof,
}

impl VhdlToken {
    /// Returns `true` for the interface modes `in`, `out`, `inout`, `buffer` and `linkage`.
    pub fn is_mode(self) -> bool {
        matches!(
            self,
            VhdlToken::In
                | VhdlToken::Out
                | VhdlToken::Inout
                | VhdlToken::Buffer
                | VhdlToken::Linkage
        )
    }

    /// Returns `true` for basic and extended identifiers.
    pub fn is_name(self) -> bool {
        matches!(self, VhdlToken::Identifier | VhdlToken::ExtendedIdentifier)
    }
}

/// A token and its location.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token {
    /// Kind.
    pub kind: VhdlToken,
    /// Source bytes covered.
    pub span: Span,
}

/// Maps a lowercase word onto its keyword kind.
pub fn lookup_keyword(s: &str) -> Option<VhdlToken> {
    let kw = match s {
        "all" => VhdlToken::All,
        "architecture" => VhdlToken::Architecture,
        "begin" => VhdlToken::Begin,
        "buffer" => VhdlToken::Buffer,
        "constant" => VhdlToken::Constant,
        "downto" => VhdlToken::Downto,
        "end" => VhdlToken::End,
        "entity" => VhdlToken::Entity,
        "generic" => VhdlToken::Generic,
        "in" => VhdlToken::In,
        "inout" => VhdlToken::Inout,
        "is" => VhdlToken::Is,
        "linkage" => VhdlToken::Linkage,
        "of" => VhdlToken::Of,
        "out" => VhdlToken::Out,
        "port" => VhdlToken::Port,
        "process" => VhdlToken::Process,
        "range" => VhdlToken::Range,
        "signal" => VhdlToken::Signal,
        "to" => VhdlToken::To,
        "variable" => VhdlToken::Variable,
        _ => return None,
    };
    Some(kw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup() {
        assert_eq!(lookup_keyword("entity"), Some(VhdlToken::Entity));
        assert_eq!(lookup_keyword("downto"), Some(VhdlToken::Downto));
        assert_eq!(lookup_keyword("std_logic"), None);
        // Reserved, but not acted on.
        assert_eq!(lookup_keyword("if"), None);
    }

    #[test]
    fn modes() {
        assert!(VhdlToken::Buffer.is_mode());
        assert!(!VhdlToken::Is.is_mode());
        assert!(VhdlToken::ExtendedIdentifier.is_name());
    }
}
