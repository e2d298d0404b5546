//! Parse errors (spec.md §7): every one is fatal and aborts the parse of
//! the current translation unit — there is no error-recovery/resync mode.

use wispc_lex::TokenKind;
use wispc_util::Span;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected:?}, found {found:?}")]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },

    #[error("unexpected token {0:?}")]
    UnexpectedToken(TokenKind),

    #[error("unexpected end of input")]
    UnexpectedNull,

    #[error("conflicting qualifiers on declaration")]
    ConflictingQualifiers,

    #[error("variadic parameter must be last")]
    VariadicNotLast,

    #[error("function prototype is missing a return type")]
    MissingReturnType,

    #[error("match branch is missing a ':' or '=>' separator")]
    MissingMatchSeparator,

    #[error("match expression has more than one 'else' branch")]
    DuplicateElseInMatch,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{span:?}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError { kind, span }
    }
}
