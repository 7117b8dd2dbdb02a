//! Diagnostic codes.
//!
//! The hundreds digit names the stage that raised the diagnostic:
//! `1xx` for the RTL front end, `2xx` for the netlist adapter and merge,
//! `3xx` for artifact generation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a diagnostic code, which selects its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Hard failures for one design, prefixed with `E`.
    Error,
    /// Recoverable problems, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A category prefix plus a three-digit number, displayed as e.g. `W104`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// No `entity ... is` declaration was found in an RTL file.
    pub const NO_ENTITY: Self = Self::new(Category::Warning, 101);
    /// The entity has no readable `port ( ... );` block.
    pub const NO_PORT_BLOCK: Self = Self::new(Category::Warning, 102);
    /// A port declaration could not be understood and was skipped.
    pub const SKIPPED_PORT: Self = Self::new(Category::Warning, 103);
    /// A property annotation carried no expression.
    pub const EMPTY_ANNOTATION: Self = Self::new(Category::Warning, 104);
    /// A string literal ran to the end of its line.
    pub const UNTERMINATED_STRING: Self = Self::new(Category::Warning, 105);
    /// An extended identifier was rewritten into a plain one.
    pub const EXTENDED_IDENTIFIER: Self = Self::new(Category::Warning, 106);

    /// The netlist document contains no modules.
    pub const NO_MODULES: Self = Self::new(Category::Warning, 201);
    /// The requested design name is absent from the netlist.
    pub const DESIGN_NOT_FOUND: Self = Self::new(Category::Warning, 202);
    /// Both views declare a port with a different width or direction.
    pub const PORT_CONFLICT: Self = Self::new(Category::Warning, 203);

    /// Sequential assertions were dropped because no clock was inferred.
    pub const SEQUENTIAL_DROPPED: Self = Self::new(Category::Warning, 301);
    /// The design has no ports; the generated artifacts are degenerate.
    pub const NO_PORTS: Self = Self::new(Category::Warning, 302);

    /// An RTL file could not be read.
    pub const RTL_UNREADABLE: Self = Self::new(Category::Error, 101);
    /// A netlist file could not be read or decoded.
    pub const NETLIST_UNREADABLE: Self = Self::new(Category::Error, 201);
    /// Neither an RTL nor a netlist view was supplied.
    pub const NO_SOURCES: Self = Self::new(Category::Error, 202);
    /// An artifact could not be written.
    pub const ARTIFACT_WRITE: Self = Self::new(Category::Error, 301);
    /// Another input in the same batch already produced this design name.
    pub const DUPLICATE_DESIGN: Self = Self::new(Category::Error, 302);
    /// The design name cannot be used as an identifier or directory name.
    pub const INVALID_DESIGN_NAME: Self = Self::new(Category::Error, 303);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
