//! wispc-lex — the lexical analyzer for the Wisp language front end.
//!
//! Converts a UTF-8 source buffer into a flat token vector terminated by
//! exactly one `Eof` token (spec.md §4.1). The scanner is single-pass and
//! non-backtracking with one character of lookahead; see [`lexer::Lexer`]
//! for the dispatch loop and [`cursor::Cursor`] for position tracking.

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;

pub use error::{LexError, LexErrorKind};
pub use lexer::Lexer;
pub use token::{Token, TokenKind, TokenValue};

use wispc_util::{FileId, Handler};

/// The public entry point from spec.md §6.4: `lex(buffer, filename) ->
/// Result<Vec<Token>, LexError>`. `file` identifies the buffer within a
/// [`wispc_util::SourceMap`] for diagnostic formatting; `handler` collects
/// the [`wispc_util::Diagnostic`] for the failing token (if any) alongside
/// the returned `Err`.
pub fn lex(buffer: &str, file: FileId, handler: &Handler) -> Result<Vec<Token>, LexError> {
    Lexer::new(buffer, file, handler).lex()
}
