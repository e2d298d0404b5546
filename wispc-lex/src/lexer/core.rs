//! The main `Lexer` struct: entry points and the top-level dispatch table
//! from spec.md §4.1's "Main loop contract".

use wispc_util::{DiagnosticCode, FileId, Handler, Span};

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) file: FileId,
    pub(crate) handler: &'a Handler,
    pub(crate) token_start: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: FileId, handler: &'a Handler) -> Self {
        let mut cursor = Cursor::new(source);
        // spec.md §4.1: "if the first three bytes are the UTF-8 BOM
        // `EF BB BF`, consume them without emitting a token."
        if source.as_bytes().starts_with(&[0xEF, 0xBB, 0xBF]) {
            cursor.advance();
        }
        Lexer {
            cursor,
            file,
            handler,
            token_start: 0,
        }
    }

    pub(crate) fn span_here(&self) -> Span {
        Span::new(self.token_start, self.cursor.position(), self.file)
    }

    pub(crate) fn fail(&mut self, kind: LexErrorKind) -> LexError {
        let span = self.span_here();
        self.handler
            .report(code_for(&kind), span, kind.to_string());
        LexError { kind, span }
    }

    /// Drives the full scan to completion, per spec.md §4.1's `lex()`
    /// contract: the main loop runs until EOF, then an `Eof` token is
    /// appended. On the first fatal error, no partial token vector is
    /// returned (spec.md §4.1 "Failure semantics").
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn lex(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Scans and returns the next token, or `Token::Eof` if the input is
    /// exhausted. This is the primitive `lex()` is built from; exposing it
    /// separately lets a host pull tokens lazily instead of buffering the
    /// whole stream (spec.md's data-flow note allows either, since "the
    /// token stream is fully buffered" is stated as equivalent to
    /// on-demand production with no parser feedback into the lexer).
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        self.token_start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, self.span_here()));
        }

        let c = self.cursor.current();
        match c {
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | ';' | '@' | '#' | '?' | '\\' => {
                Ok(self.lex_single_char_punct(c))
            }
            '\n' | '\r' | ' ' | '\t' => unreachable!("whitespace already skipped"),
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            '"' => self.lex_string(),
            '\'' => self.lex_char(),
            _ => self.lex_operator(),
        }
    }

    fn lex_single_char_punct(&mut self, c: char) -> Token {
        self.cursor.advance();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '@' => TokenKind::At,
            '#' => TokenKind::Hash,
            '?' => TokenKind::Question,
            '\\' => TokenKind::Backslash,
            _ => unreachable!(),
        };
        Token::new(kind, self.span_here())
    }
}

fn code_for(kind: &LexErrorKind) -> DiagnosticCode {
    match kind {
        LexErrorKind::InvalidCharacter(_) => DiagnosticCode::InvalidCharacter,
        LexErrorKind::UnterminatedString => DiagnosticCode::UnterminatedString,
        LexErrorKind::UnterminatedChar => DiagnosticCode::UnterminatedChar,
        LexErrorKind::EmptyCharLiteral => DiagnosticCode::EmptyCharLiteral,
        LexErrorKind::MultiCharCharLiteral => DiagnosticCode::MultiCharCharLiteral,
        LexErrorKind::BadEscape(_) => DiagnosticCode::BadEscape,
        LexErrorKind::UnterminatedBlockComment => DiagnosticCode::UnterminatedBlockComment,
        LexErrorKind::BadNumericLiteral => DiagnosticCode::BadNumericLiteral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_ok(src: &str) -> Vec<Token> {
        let handler = Handler::new();
        Lexer::new(src, FileId(0), &handler).lex().expect("lex should succeed")
    }

    #[test]
    fn empty_input_yields_only_eof() {
        let tokens = lex_ok("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn whitespace_only_yields_only_eof() {
        let tokens = lex_ok("   \n\t\r\n  ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn bom_is_consumed_silently() {
        let with_bom = lex_ok("\u{FEFF}x");
        let without_bom = lex_ok("x");
        let kinds_a: Vec<_> = with_bom.iter().map(|t| t.kind).collect();
        let kinds_b: Vec<_> = without_bom.iter().map(|t| t.kind).collect();
        assert_eq!(kinds_a, kinds_b);
    }

    #[test]
    fn single_char_punctuators_lex() {
        let tokens = lex_ok("(){}[],;@#?\\");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::At,
                TokenKind::Hash,
                TokenKind::Question,
                TokenKind::Backslash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn token_offsets_are_non_decreasing() {
        let tokens = lex_ok("const Int32 x = 42;");
        let mut last = 0u32;
        for t in &tokens {
            assert!(t.span.lo >= last);
            last = t.span.lo;
        }
    }
}
