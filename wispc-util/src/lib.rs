//! Shared infrastructure for the Wisp compiler front end: source spans,
//! string interning, and diagnostic reporting.
//!
//! `wispc-lex` and `wispc-par` both depend on this crate and nothing else
//! outside the standard library's text-handling types, keeping the span,
//! symbol, and diagnostic representations consistent across the lexer and
//! parser boundary.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use error::SourceMapError;
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;
