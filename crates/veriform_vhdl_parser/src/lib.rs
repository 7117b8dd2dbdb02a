//! Declaration-level VHDL front end.
//!
//! Extracts what verification needs from an RTL file and nothing more: the
//! entity name, its ports with inferred widths, whether the design is
//! clocked, and the `@c2vhdl:` property annotations in comments. The main
//! entry point is [`parse_file`], which always returns a usable
//! [`ModuleAst`]; anything it could not find is reported to the
//! [`DiagnosticSink`] and recorded as a note on the module.
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): tokens plus line-comment trivia.
//! - **Recognizer** ([`parser`]): entity header, port clause, fallback scan
//!   and clock idioms.
//! - **Widths** ([`width`]) and **annotations** ([`annotation`]).

#![warn(missing_docs)]

pub mod annotation;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod width;

pub use parser::{DesignOutline, PortSource, RtlParser};
pub use token::{Token, VhdlToken};

use tracing::{debug, warn};
use veriform_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use veriform_ir::{is_identifier, mangle_identifier, ModuleAst};
use veriform_source::{FileId, SourceDb, Span};

/// Design name used when neither an entity nor a usable file name exists.
pub const FALLBACK_DESIGN_NAME: &str = "design";

/// Parses one RTL file into a module.
pub fn parse_file(file_id: FileId, source_db: &SourceDb, sink: &DiagnosticSink) -> ModuleAst {
    let file = source_db.get_file(file_id);
    let lexed = lexer::lex(&file.content, file_id, sink);
    let outline = RtlParser::new(&lexed.tokens, &file.content, sink).parse_outline();

    let design_name = match &outline.entity {
        Some(entity) => entity.name.clone(),
        None => {
            let fallback = match file.stem().filter(|s| !s.is_empty()) {
                Some(stem) if is_identifier(stem) => stem.to_string(),
                Some(stem) => mangle_identifier(stem),
                None => FALLBACK_DESIGN_NAME.to_string(),
            };
            warn!(file = %file.path.display(), %fallback, "no entity declaration");
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::NO_ENTITY,
                    format!("no entity declaration found in {}", file.path.display()),
                    Span::new(file_id, 0, 0),
                )
                .with_note(format!("the design is named '{fallback}' after the file")),
            );
            fallback
        }
    };

    let mut ast = ModuleAst::new(design_name);
    ast.source_rtl = Some(file.path.clone());
    ast.set_has_clock(outline.has_clock);

    if outline.entity.is_none() {
        ast.note(format!(
            "No entity declaration found; design named after file '{}'.",
            ast.design_name
        ));
    }
    if outline.port_source == PortSource::FileScan {
        let span = outline
            .entity
            .as_ref()
            .map_or(Span::new(file_id, 0, 0), |e| e.span);
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::NO_PORT_BLOCK,
                "no port clause found; collecting port declarations from the whole file",
                span,
            )
            .with_help("declarations in component or subprogram headers may be picked up"),
        );
        ast.note(format!(
            "No port clause found; {} port(s) collected by scanning the whole file.",
            outline.ports.len()
        ));
    }
    ast.ports = outline.ports;
    ast.properties = annotation::extract_properties(file, &lexed.comments, sink);

    debug!(
        design = %ast.design_name,
        ports = ast.ports.len(),
        properties = ast.properties.len(),
        has_clock = ast.has_clock(),
        "parsed RTL"
    );
    ast
}
