//! The fatal lex error taxonomy from spec.md §7.

use thiserror::Error;
use wispc_util::Span;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    InvalidCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("empty character literal")]
    EmptyCharLiteral,
    #[error("character literal contains more than one character")]
    MultiCharCharLiteral,
    #[error("unknown escape sequence '\\{0}'")]
    BadEscape(char),
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("invalid numeric literal")]
    BadNumericLiteral,
}

/// A fatal lex error, already bound to the offending location. spec.md §7:
/// "the error is enriched with the offending token's location and surfaced
/// to the diagnostic sink."
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{span:?}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}
