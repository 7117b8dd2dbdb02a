//! Identifier rules shared by the front ends and the generators.
//!
//! Design and port names end up as SystemVerilog and C identifiers and as
//! directory names, so every name a generator sees must be a plain
//! `[A-Za-z_][A-Za-z0-9_]*` identifier.

/// Returns `true` if `name` is usable as-is in SystemVerilog, C and a path.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Rewrites `raw` into a plain identifier.
///
/// VHDL extended identifiers (`\bus 0\`) lose their delimiters and doubled
/// backslashes collapse. Every remaining character outside `[A-Za-z0-9_]`
/// becomes `_`, and a leading digit or an empty result gains a `_` prefix.
pub fn mangle_identifier(raw: &str) -> String {
    let inner = raw
        .strip_prefix('\\')
        .and_then(|s| s.strip_suffix('\\'))
        .map_or_else(|| raw.to_string(), |s| s.replace("\\\\", "\\"));

    let mut out: String = inner
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if !out.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        out.insert(0, '_');
    }
    out
}
