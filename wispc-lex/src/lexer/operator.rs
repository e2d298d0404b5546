//! Operator and multi-character punctuator scanning via maximal munch
//! (spec.md §4.1 "Maximal munch for operators", table in §6.2).
//!
//! Each arm tries the longest match first: three characters, then two,
//! then one.

use super::core::Lexer;
use crate::error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_operator(&mut self) -> Result<Token, LexError> {
        let c = self.cursor.advance();
        let kind = match c {
            '.' => {
                if self.cursor.eat('.') {
                    if self.cursor.eat('.') {
                        TokenKind::DotDotDot
                    } else {
                        TokenKind::DotDot
                    }
                } else {
                    TokenKind::Dot
                }
            }
            ':' => {
                if self.cursor.eat(':') {
                    TokenKind::ColonColon
                } else {
                    TokenKind::Colon
                }
            }
            '=' => {
                if self.cursor.eat('=') {
                    TokenKind::EqEq
                } else if self.cursor.eat('>') {
                    TokenKind::FatArrow
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                if self.cursor.eat('=') {
                    TokenKind::BangEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.cursor.eat('<') {
                    if self.cursor.eat('=') {
                        TokenKind::ShlEq
                    } else {
                        TokenKind::Shl
                    }
                } else if self.cursor.eat('=') {
                    TokenKind::LtEq
                } else if self.cursor.eat('-') {
                    TokenKind::ArrowLeft
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.cursor.eat('>') {
                    if self.cursor.eat('=') {
                        TokenKind::ShrEq
                    } else {
                        TokenKind::Shr
                    }
                } else if self.cursor.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '+' => {
                if self.cursor.eat('+') {
                    TokenKind::PlusPlus
                } else if self.cursor.eat('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.cursor.eat('-') {
                    TokenKind::MinusMinus
                } else if self.cursor.eat('=') {
                    TokenKind::MinusEq
                } else if self.cursor.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.cursor.eat('*') {
                    TokenKind::StarStar
                } else if self.cursor.eat('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.cursor.eat('=') {
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.cursor.eat('=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }
            '&' => {
                if self.cursor.eat('&') {
                    TokenKind::AmpAmp
                } else if self.cursor.eat('=') {
                    TokenKind::AmpEq
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.cursor.eat('|') {
                    TokenKind::PipePipe
                } else if self.cursor.eat('=') {
                    TokenKind::PipeEq
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.cursor.eat('=') {
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }
            '~' => {
                if self.cursor.eat('=') {
                    TokenKind::TildeEq
                } else {
                    TokenKind::Tilde
                }
            }
            other => return Err(self.fail(LexErrorKind::InvalidCharacter(other))),
        };
        Ok(Token::new(kind, self.span_here()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn maximal_munch_prefers_longest_operator() {
        assert_eq!(
            kinds("<<="),
            vec![TokenKind::ShlEq, TokenKind::Eof]
        );
        assert_eq!(kinds("<<"), vec![TokenKind::Shl, TokenKind::Eof]);
        assert_eq!(kinds("<"), vec![TokenKind::Lt, TokenKind::Eof]);
    }

    #[test]
    fn triple_dot_vs_double_vs_single() {
        assert_eq!(kinds("..."), vec![TokenKind::DotDotDot, TokenKind::Eof]);
        assert_eq!(kinds(".."), vec![TokenKind::DotDot, TokenKind::Eof]);
        assert_eq!(kinds("."), vec![TokenKind::Dot, TokenKind::Eof]);
    }

    #[test]
    fn arrows_and_fat_arrow() {
        assert_eq!(kinds("->"), vec![TokenKind::Arrow, TokenKind::Eof]);
        assert_eq!(kinds("<-"), vec![TokenKind::ArrowLeft, TokenKind::Eof]);
        assert_eq!(kinds("=>"), vec![TokenKind::FatArrow, TokenKind::Eof]);
    }

    #[test]
    fn invalid_character_is_fatal() {
        let handler = Handler::new();
        let err = crate::lexer::core::Lexer::new("`", FileId(0), &handler)
            .next_token()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidCharacter('`'));
    }
}
