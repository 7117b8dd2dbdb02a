//! Bit-width inference from a port's subtype indication.
//!
//! Rules, first match wins:
//!
//! 1. a literal index range `(A downto B)` or `(A to B)` gives `|A - B| + 1`;
//! 2. a vector type without such a range gives 1, since its width is unknown;
//! 3. an integer type constrained by `range X to Y` gives the bits needed
//!    for the upper bound, at least 1;
//! 4. an unconstrained integer type gives 32;
//! 5. anything else gives 1.

use crate::token::{Token, VhdlToken};

/// Width of an unconstrained `integer`, `natural` or `positive`.
pub const UNCONSTRAINED_INTEGER_WIDTH: u32 = 32;

const INTEGER_TYPES: &[&str] = &["integer", "natural", "positive"];
const VECTOR_TYPES: &[&str] = &["unsigned", "signed"];

/// Infers the width of the subtype indication in `ty`, read from `source`.
pub fn infer_width(ty: &[Token], source: &str) -> u32 {
    let text = |t: &Token| &source[t.span.start as usize..t.span.end as usize];

    for w in ty.windows(5) {
        let is_range = w[0].kind == VhdlToken::LeftParen
            && w[1].kind == VhdlToken::IntLiteral
            && matches!(w[2].kind, VhdlToken::Downto | VhdlToken::To)
            && w[3].kind == VhdlToken::IntLiteral
            && w[4].kind == VhdlToken::RightParen;
        if !is_range {
            continue;
        }
        if let (Some(a), Some(b)) = (parse_integer(text(&w[1])), parse_integer(text(&w[3]))) {
            return u32::try_from(a.abs_diff(b).saturating_add(1)).unwrap_or(u32::MAX);
        }
    }

    let Some(mark) = ty.iter().find(|t| t.kind == VhdlToken::Identifier) else {
        return 1;
    };
    let mark = text(mark).to_ascii_lowercase();
    if mark.ends_with("_vector") || VECTOR_TYPES.contains(&mark.as_str()) {
        return 1;
    }
    if !INTEGER_TYPES.contains(&mark.as_str()) {
        return 1;
    }

    for w in ty.windows(4) {
        if w[0].kind != VhdlToken::Range
            || w[1].kind != VhdlToken::IntLiteral
            || w[3].kind != VhdlToken::IntLiteral
        {
            continue;
        }
        let (Some(left), Some(right)) = (parse_integer(text(&w[1])), parse_integer(text(&w[3])))
        else {
            continue;
        };
        let upper = match w[2].kind {
            VhdlToken::To => right,
            VhdlToken::Downto => left,
            _ => continue,
        };
        return bits_for(upper);
    }
    UNCONSTRAINED_INTEGER_WIDTH
}

/// Bits needed to hold `value` as an unsigned number, i.e. `ceil(log2(value + 1))`, at least 1.
pub fn bits_for(value: u64) -> u32 {
    (u64::BITS - value.leading_zeros()).max(1)
}

/// Parses a decimal or based VHDL integer literal such as `1_024` or `16#FF#`.
pub fn parse_integer(literal: &str) -> Option<u64> {
    let clean: String = literal.chars().filter(|&c| c != '_').collect();
    let (mantissa, exponent) = split_exponent(&clean);
    let value = match mantissa.split_once('#') {
        Some((base, rest)) => {
            let base: u32 = base.parse().ok()?;
            if !(2..=16).contains(&base) {
                return None;
            }
            u64::from_str_radix(rest.strip_suffix('#')?, base).ok()?
        }
        None => mantissa.parse().ok()?,
    };
    match exponent {
        Some(exp) => value.checked_mul(10u64.checked_pow(exp)?),
        None => Some(value),
    }
}

fn split_exponent(literal: &str) -> (&str, Option<u32>) {
    // A based mantissa may contain 'e' as a digit, so only look past the closing '#'.
    let search_from = literal.rfind('#').map_or(0, |i| i + 1);
    match literal[search_from..].find(['e', 'E']) {
        Some(i) => {
            let at = search_from + i;
            let exp = literal[at + 1..].trim_start_matches('+').parse().ok();
            (&literal[..at], exp)
        }
        None => (literal, None),
    }
}
