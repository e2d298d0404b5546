//! Diagnostic reporting — the implementation of spec.md §6.3's
//! `DiagnosticSink` collaborator.
//!
//! spec.md treats the sink as external and specifies only its interface:
//! `report(kind, location, message) -> never`. A real crate in this corpus
//! never leaves that as a bare trait a caller must supply; it ships a
//! concrete `Handler` that a host can either let panic (matching "the sink
//! aborts the compilation unit") or use to collect every diagnostic emitted
//! during a batch of units, per the teacher's `Handler` type.

use crate::span::{Span, SourceMap};
use std::cell::RefCell;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        };
        f.write_str(s)
    }
}

/// One entry per fatal condition in spec.md §7's lex/parse error taxonomy,
/// plus a handful of warning codes a host embedding this crate may want to
/// surface without aborting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticCode {
    InvalidCharacter,
    UnterminatedString,
    UnterminatedChar,
    EmptyCharLiteral,
    MultiCharCharLiteral,
    BadEscape,
    UnterminatedBlockComment,
    BadNumericLiteral,
    ExpectedToken,
    UnexpectedToken,
    UnexpectedNull,
    ConflictingQualifiers,
    VariadicNotLast,
    MissingReturnType,
    MissingMatchSeparator,
    DuplicateElseInMatch,
}

impl DiagnosticCode {
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCode::InvalidCharacter => "InvalidCharacter",
            DiagnosticCode::UnterminatedString => "UnterminatedString",
            DiagnosticCode::UnterminatedChar => "UnterminatedChar",
            DiagnosticCode::EmptyCharLiteral => "EmptyCharLiteral",
            DiagnosticCode::MultiCharCharLiteral => "MultiCharCharLiteral",
            DiagnosticCode::BadEscape => "BadEscape",
            DiagnosticCode::UnterminatedBlockComment => "UnterminatedBlockComment",
            DiagnosticCode::BadNumericLiteral => "BadNumericLiteral",
            DiagnosticCode::ExpectedToken => "ExpectedToken",
            DiagnosticCode::UnexpectedToken => "UnexpectedToken",
            DiagnosticCode::UnexpectedNull => "UnexpectedNull",
            DiagnosticCode::ConflictingQualifiers => "ConflictingQualifiers",
            DiagnosticCode::VariadicNotLast => "VariadicNotLast",
            DiagnosticCode::MissingReturnType => "MissingReturnType",
            DiagnosticCode::MissingMatchSeparator => "MissingMatchSeparator",
            DiagnosticCode::DuplicateElseInMatch => "DuplicateElseInMatch",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(level: Level, code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            level,
            code,
            message: message.into(),
            span,
        }
    }

    /// Renders `"{filename}:{line}:{column}: {kind}: {message}"` per
    /// spec.md §7's user-visible format.
    pub fn format(&self, source_map: &SourceMap) -> String {
        format!(
            "{}: {}: {}",
            source_map.format_location(self.span),
            self.code.name(),
            self.message
        )
    }
}

/// Collects diagnostics emitted while lexing/parsing a unit.
///
/// `Handler::new()` never panics: diagnostics accumulate and the caller
/// decides what "fatal for the unit" means (spec.md §4.1/§4.2 both specify
/// that lex/parse return `Err` rather than exposing a partial result, which
/// `wispc-lex`/`wispc-par` implement by checking `Handler::has_errors()`
/// immediately after the first diagnostic and returning early).
/// `Handler::new_panicking()` panics on the first error, which is useful in
/// tests and `debug_assert!`-style internal invariants.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    panic_on_error: bool,
}

impl Handler {
    pub fn new() -> Self {
        Handler {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: false,
        }
    }

    pub fn new_panicking() -> Self {
        Handler {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: true,
        }
    }

    pub fn report(&self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        let message = message.into();
        if self.panic_on_error {
            panic!("{}: {}", code.name(), message);
        }
        self.diagnostics
            .borrow_mut()
            .push(Diagnostic::new(Level::Error, code, message, span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}
