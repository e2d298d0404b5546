//! Identifier and keyword scanning (spec.md §4.1 "Identifier scanning").

use wispc_util::Symbol;

use super::core::Lexer;
use crate::error::LexError;
use crate::token::{keyword_from_ident, Token, TokenKind, TokenValue};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_identifier(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.position() as usize;
        while !self.cursor.is_at_end() {
            let c = self.cursor.current();
            if c.is_ascii_alphanumeric() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }
        let end = self.cursor.position() as usize;
        let text = &self.cursor.source()[start..end];

        let span = self.span_here();
        if let Some(keyword) = keyword_from_ident(text) {
            Ok(Token::new(keyword, span))
        } else {
            Ok(Token::with_value(
                TokenKind::Identifier,
                TokenValue::Ident(Symbol::intern(text)),
                span,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::core::Lexer;
    use wispc_util::{FileId, Handler};

    fn first_token(src: &str) -> Token {
        let handler = Handler::new();
        Lexer::new(src, FileId(0), &handler).next_token().unwrap()
    }

    #[test]
    fn plain_identifier() {
        let tok = first_token("foo_bar1");
        assert_eq!(tok.kind, TokenKind::Identifier);
        match tok.value {
            Some(TokenValue::Ident(sym)) => assert_eq!(sym.as_str(), "foo_bar1"),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn keyword_wins_over_identifier() {
        assert_eq!(first_token("return").kind, TokenKind::Return);
        assert_eq!(first_token("unreachable").kind, TokenKind::Unreachable);
    }

    #[test]
    fn underscore_prefixed_identifier() {
        assert_eq!(first_token("_private").kind, TokenKind::Identifier);
    }
}
