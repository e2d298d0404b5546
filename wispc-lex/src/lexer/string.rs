//! String and character literal scanning (spec.md §4.1 "String literal
//! scanning" / "Character literal scanning").

use wispc_util::Symbol;

use super::core::Lexer;
use crate::error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind, TokenValue};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_string(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // consume opening '"'
        let mut out = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.fail(LexErrorKind::UnterminatedString));
            }
            match self.cursor.current() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    out.push(self.scan_escape()?);
                }
                c => {
                    out.push(c);
                    self.cursor.advance();
                }
            }
        }
        Ok(Token::with_value(
            TokenKind::StringLiteral,
            TokenValue::Str(Symbol::intern(&out)),
            self.span_here(),
        ))
    }

    pub(crate) fn lex_char(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // consume opening '\''

        if self.cursor.current() == '\'' {
            return Err(self.fail(LexErrorKind::EmptyCharLiteral));
        }
        if self.cursor.is_at_end() {
            return Err(self.fail(LexErrorKind::UnterminatedChar));
        }

        let value = if self.cursor.current() == '\\' {
            self.scan_escape()?
        } else {
            let c = self.cursor.current();
            self.cursor.advance();
            c
        };

        if self.cursor.is_at_end() {
            return Err(self.fail(LexErrorKind::UnterminatedChar));
        }
        if self.cursor.current() != '\'' {
            // Anything other than the closing quote right after one
            // logical character means more than one character was given.
            return Err(self.fail(LexErrorKind::MultiCharCharLiteral));
        }
        self.cursor.advance(); // consume closing '\''

        Ok(Token::with_value(
            TokenKind::CharLiteral,
            TokenValue::Char(value),
            self.span_here(),
        ))
    }

    /// Scans one escape sequence (the `\` has not yet been consumed) and
    /// returns its decoded character. spec.md §4.1 lists the full set:
    /// `\\ \" \' \n \r \t \0 \xHH`.
    fn scan_escape(&mut self) -> Result<char, LexError> {
        self.cursor.advance(); // consume '\\'
        if self.cursor.is_at_end() {
            return Err(self.fail(LexErrorKind::UnterminatedString));
        }
        let c = self.cursor.current();
        let decoded = match c {
            '\\' => {
                self.cursor.advance();
                '\\'
            }
            '"' => {
                self.cursor.advance();
                '"'
            }
            '\'' => {
                self.cursor.advance();
                '\''
            }
            'n' => {
                self.cursor.advance();
                '\n'
            }
            'r' => {
                self.cursor.advance();
                '\r'
            }
            't' => {
                self.cursor.advance();
                '\t'
            }
            '0' => {
                self.cursor.advance();
                '\0'
            }
            'x' => {
                self.cursor.advance();
                let hi = self.cursor.current();
                self.cursor.advance();
                let lo = self.cursor.current();
                self.cursor.advance();
                let byte = hi
                    .to_digit(16)
                    .zip(lo.to_digit(16))
                    .map(|(h, l)| (h * 16 + l) as u8);
                match byte {
                    Some(b) => b as char,
                    None => return Err(self.fail(LexErrorKind::BadEscape('x'))),
                }
            }
            other => return Err(self.fail(LexErrorKind::BadEscape(other))),
        };
        Ok(decoded)
    }
}
