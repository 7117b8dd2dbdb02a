//! C harness scaffold for ESBMC-style bounded model checkers.
//!
//! Inputs are drawn from `__VERIFIER_nondet_*` using the smallest unsigned C
//! type that holds the port, so the checker explores every value of that
//! type rather than only the port's true range. Properties appear as
//! comments next to a commented-out call into the translated model; wiring
//! that call up is left to the user.

use std::fmt::Write;

use veriform_ir::{DesignSpec, Port, Property};

/// Unsigned C storage type for a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CType {
    /// `unsigned char`, up to 8 bits.
    UChar,
    /// `unsigned short`, up to 16 bits.
    UShort,
    /// `unsigned int`, up to 32 bits.
    UInt,
    /// `unsigned long long`, anything wider.
    ULongLong,
}

impl CType {
    /// All categories, smallest first.
    pub const ALL: [CType; 4] = [Self::UChar, Self::UShort, Self::UInt, Self::ULongLong];

    /// The smallest category that fits `width` bits.
    pub fn for_width(width: u32) -> Self {
        match width {
            0..=8 => Self::UChar,
            9..=16 => Self::UShort,
            17..=32 => Self::UInt,
            _ => Self::ULongLong,
        }
    }

    /// The C spelling of the type.
    pub fn c_name(self) -> &'static str {
        match self {
            Self::UChar => "unsigned char",
            Self::UShort => "unsigned short",
            Self::UInt => "unsigned int",
            Self::ULongLong => "unsigned long long",
        }
    }

    /// The nondeterministic generator for this type.
    pub fn nondet_fn(self) -> &'static str {
        match self {
            Self::UChar => "__VERIFIER_nondet_uchar",
            Self::UShort => "__VERIFIER_nondet_ushort",
            Self::UInt => "__VERIFIER_nondet_uint",
            Self::ULongLong => "__VERIFIER_nondet_ulonglong",
        }
    }
}

/// File name of the harness, e.g. `counter_harness.c`.
pub fn harness_file_name(design: &str) -> String {
    format!("{design}_harness.c")
}

/// Renders the harness translation unit for `spec`.
///
/// Inout ports are driven like inputs.
pub fn generate_harness(spec: &DesignSpec) -> String {
    let design = &spec.design;
    let mut out = String::new();
    let _ = writeln!(out, "// Bounded-model-check harness for `{design}`.");
    let _ = writeln!(out, "#include <assert.h>");
    let _ = writeln!(out);
    for ty in CType::ALL {
        let _ = writeln!(out, "extern {} {}(void);", ty.c_name(), ty.nondet_fn());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "// Entry point of the translated model; match its real signature.");
    let _ = writeln!(out, "void {design}_step(void);");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "#define __VERIFIER_assume(x) do {{ if (!(x)) __builtin_unreachable(); }} while (0)"
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "int main(void) {{");
    for port in spec.inputs().chain(spec.inouts()) {
        write_nondet(&mut out, port);
    }
    for port in spec.outputs() {
        let ty = CType::for_width(port.width);
        let _ = writeln!(out, "    {} {} = 0;", ty.c_name(), port.name);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "    // Assumptions");
    for p in &spec.assumes {
        write_property_comment(&mut out, "ASSUME", p);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "    // {design}_step();");
    let _ = writeln!(out);
    let _ = writeln!(out, "    // Assertions");
    for p in &spec.asserts {
        write_property_comment(&mut out, "ASSERT", p);
    }
    let _ = writeln!(out, "    return 0;");
    let _ = writeln!(out, "}}");
    out
}

fn write_nondet(out: &mut String, port: &Port) {
    let ty = CType::for_width(port.width);
    let _ = writeln!(
        out,
        "    {} {} = {}(); // {} bit(s)",
        ty.c_name(),
        port.name,
        ty.nondet_fn(),
        port.width
    );
}

fn write_property_comment(out: &mut String, tag: &str, property: &Property) {
    let expr = property.expr.trim();
    if expr.is_empty() {
        return;
    }
    let _ = write!(out, "    // {tag}: {expr}");
    if let Some(msg) = &property.msg {
        let _ = write!(out, " ({msg})");
    }
    let _ = writeln!(out);
}
