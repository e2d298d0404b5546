//! wispc-par — the recursive-descent parser for the Wisp language front
//! end. Consumes the flat token vector produced by `wispc_lex::lex` and
//! builds the tagged-variant tree defined in [`ast`].
//!
//! The parser is a single forward pass with one token of lookahead and no
//! backtracking: every production either commits to a node or raises a
//! fatal [`ParseError`] that aborts the translation unit (spec.md §7).

pub mod ast;
pub mod error;
mod expr;
mod items;
mod stmt;

pub use ast::{AstKind, AstNode};
pub use error::{ParseError, ParseErrorKind};

use wispc_lex::{Token, TokenKind};
use wispc_util::{DiagnosticCode, FileId, Handler, Span};

/// The recursive-descent parser. Holds the full token vector (the lexer
/// already ran to completion) and a cursor into it; `peek`/`chomp` never
/// run past the trailing `Eof`.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    file: FileId,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, file: FileId, handler: &'a Handler) -> Parser<'a> {
        debug_assert!(
            tokens.last().map(|t| t.kind) == Some(TokenKind::Eof),
            "token stream must be Eof-terminated"
        );
        Parser {
            tokens,
            pos: 0,
            file,
            handler,
        }
    }

    pub(crate) fn peek(&self) -> Token {
        self.tokens[self.pos]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_kind_at(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Consumes and returns the current token, advancing the cursor. Never
    /// advances past the trailing `Eof` so repeated calls at end-of-stream
    /// are safe.
    pub(crate) fn chomp(&mut self) -> Token {
        let tok = self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn chomp_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == kind {
            Some(self.chomp())
        } else {
            None
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.peek_kind() == kind {
            Ok(self.chomp())
        } else {
            Err(self.error_expected(kind))
        }
    }

    pub(crate) fn error_expected(&self, expected: TokenKind) -> ParseError {
        let found = self.peek_kind();
        let span = self.current_span();
        self.handler.report(
            DiagnosticCode::ExpectedToken,
            span,
            format!("expected {expected:?}, found {found:?}"),
        );
        ParseError::new(
            ParseErrorKind::ExpectedToken { expected, found },
            span,
        )
    }

    pub(crate) fn error_unexpected(&self) -> ParseError {
        let found = self.peek_kind();
        let span = self.current_span();
        self.handler.report(
            DiagnosticCode::UnexpectedToken,
            span,
            format!("unexpected token {found:?}"),
        );
        ParseError::new(ParseErrorKind::UnexpectedToken(found), span)
    }

    pub(crate) fn error_kind(&self, kind: ParseErrorKind, code: DiagnosticCode) -> ParseError {
        let span = self.current_span();
        self.handler.report(code, span, kind.to_string());
        ParseError::new(kind, span)
    }
}

/// The public entry point from spec.md §6.4: `parse(tokens) ->
/// Result<AstNode, ParseError>`. Builds a [`ast::AstKind::TranslationUnit`]
/// of every top-level declaration.
#[tracing::instrument(level = "debug", skip(tokens, handler))]
pub fn parse(tokens: Vec<Token>, file: FileId, handler: &Handler) -> Result<AstNode, ParseError> {
    let mut parser = Parser::new(tokens, file, handler);
    parser.parse_translation_unit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wispc_util::SourceMap;

    fn parse_src(src: &str) -> Result<AstNode, ParseError> {
        let mut map = SourceMap::new();
        let file = map.add_file("test.wsp", src.to_string());
        let handler = Handler::new();
        let tokens = wispc_lex::lex(src, file, &handler).expect("lex should succeed");
        parse(tokens, file, &handler)
    }

    #[test]
    fn empty_source_is_an_empty_translation_unit() {
        let ast = parse_src("").unwrap();
        match ast.kind {
            AstKind::TranslationUnit(items) => assert!(items.is_empty()),
            other => panic!("expected TranslationUnit, got {other:?}"),
        }
    }
}
