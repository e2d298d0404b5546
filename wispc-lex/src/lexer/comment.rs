//! Whitespace and comment skipping (spec.md §4.1): single-line `//`
//! comments run to end-of-line; block comments `/* ... */` stop at the
//! *first* `*/` — nesting is explicitly not supported.

use super::core::Lexer;
use crate::error::{LexError, LexErrorKind};

impl<'a> Lexer<'a> {
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            self.token_start = self.cursor.position();
            match self.cursor.current() {
                ' ' | '\r' | '\t' | '\n' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_next() == '/' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    self.skip_line_comment();
                }
                '/' if self.cursor.peek_next() == '*' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    self.skip_block_comment()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current() != '\n' {
            self.cursor.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        loop {
            if self.cursor.is_at_end() {
                return Err(self.fail(LexErrorKind::UnterminatedBlockComment));
            }
            if self.cursor.current() == '*' && self.cursor.peek_next() == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return Ok(());
            }
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use wispc_util::{FileId, Handler};

    fn kinds(src: &str) -> Vec<TokenKind> {
        let handler = Handler::new();
        crate::lexer::core::Lexer::new(src, FileId(0), &handler)
            .lex()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn line_comment_is_discarded() {
        assert_eq!(kinds("// a comment\n"), vec![TokenKind::Eof]);
        assert_eq!(
            kinds("x // trailing\ny"),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn block_comment_stops_at_first_close() {
        assert_eq!(kinds("/* a */ /* b */"), vec![TokenKind::Eof]);
    }

    #[test]
    fn block_comment_does_not_nest() {
        // The first `*/` closes the comment; the trailing `*/` then lexes
        // as Star, Slash.
        assert_eq!(
            kinds("/* outer /* inner */ still */"),
            vec![
                TokenKind::Identifier,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_block_comment_is_fatal() {
        let handler = Handler::new();
        let err = crate::lexer::core::Lexer::new("/* never closed", FileId(0), &handler)
            .next_token()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedBlockComment);
    }
}
