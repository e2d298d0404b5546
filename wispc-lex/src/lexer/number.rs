//! Numeric literal scanning (spec.md §4.1 "Numeric literal scanning"):
//! decimal, `0x`/`0o`/`0b` radix literals, underscore digit separators, and
//! the no-exponent float form `digits '.' digits`.

use super::core::Lexer;
use crate::error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind, TokenValue};

enum Radix {
    Dec,
    Hex,
    Oct,
    Bin,
}

impl Radix {
    fn value(&self) -> u32 {
        match self {
            Radix::Dec => 10,
            Radix::Hex => 16,
            Radix::Oct => 8,
            Radix::Bin => 2,
        }
    }

    fn is_digit(&self, c: char) -> bool {
        c.is_digit(self.value())
    }
}

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self) -> Result<Token, LexError> {
        if self.cursor.current() == '0' {
            self.cursor.advance();
            let radix = match self.cursor.current() {
                'x' | 'X' => Some(Radix::Hex),
                'o' | 'O' => Some(Radix::Oct),
                'b' | 'B' => Some(Radix::Bin),
                _ => None,
            };
            if let Some(radix) = radix {
                self.cursor.advance(); // consume prefix letter
                let digits = self.scan_digit_run(&radix);
                if digits.is_empty() {
                    return Err(self.fail(LexErrorKind::BadNumericLiteral));
                }
                let parsed = u64::from_str_radix(&digits, radix.value());
                return match parsed {
                    Ok(n) => Ok(Token::with_value(
                        TokenKind::IntegerLiteral,
                        TokenValue::Int(n),
                        self.span_here(),
                    )),
                    Err(_) => Err(self.fail(LexErrorKind::BadNumericLiteral)),
                };
            }

            if self.cursor.current().is_ascii_digit() {
                // A leading zero followed by another decimal digit (e.g.
                // "01") is not a valid literal in this version.
                return Err(self.fail(LexErrorKind::BadNumericLiteral));
            }

            if self.cursor.current() == '.' && self.cursor.peek_next().is_ascii_digit() {
                return self.lex_float_tail("0".to_string());
            }

            return Ok(Token::with_value(
                TokenKind::IntegerLiteral,
                TokenValue::Int(0),
                self.span_here(),
            ));
        }

        let digits = self.scan_digit_run(&Radix::Dec);
        if self.cursor.current() == '.' && self.cursor.peek_next().is_ascii_digit() {
            return self.lex_float_tail(digits);
        }

        match digits.parse::<u64>() {
            Ok(n) => Ok(Token::with_value(
                TokenKind::IntegerLiteral,
                TokenValue::Int(n),
                self.span_here(),
            )),
            Err(_) => Err(self.fail(LexErrorKind::BadNumericLiteral)),
        }
    }

    fn lex_float_tail(&mut self, int_part: String) -> Result<Token, LexError> {
        self.cursor.advance(); // consume '.'
        let frac = self.scan_digit_run(&Radix::Dec);
        let text = format!("{int_part}.{frac}");
        match text.parse::<f64>() {
            Ok(f) => Ok(Token::with_value(
                TokenKind::FloatLiteral,
                TokenValue::Float(f),
                self.span_here(),
            )),
            Err(_) => Err(self.fail(LexErrorKind::BadNumericLiteral)),
        }
    }

    /// Consumes a run of digits valid in `radix`, permitting (and
    /// discarding) `_` separators between digits, per spec.md "Underscores
    /// inside digit runs are permitted and ignored."
    fn scan_digit_run(&mut self, radix: &Radix) -> String {
        let mut out = String::new();
        loop {
            let c = self.cursor.current();
            if radix.is_digit(c) {
                out.push(c);
                self.cursor.advance();
            } else if c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wispc_util::{FileId, Handler};

    fn lex_one(src: &str) -> Token {
        let handler = Handler::new();
        crate::lexer::core::Lexer::new(src, FileId(0), &handler)
            .next_token()
            .unwrap()
    }

    #[test]
    fn bare_zero() {
        let tok = lex_one("0");
        assert_eq!(tok.kind, TokenKind::IntegerLiteral);
        assert_eq!(tok.value, Some(TokenValue::Int(0)));
    }

    #[test]
    fn decimal_with_underscores() {
        let tok = lex_one("1_000_000");
        assert_eq!(tok.value, Some(TokenValue::Int(1_000_000)));
    }

    #[test]
    fn hex_octal_binary() {
        assert_eq!(lex_one("0xFF").value, Some(TokenValue::Int(255)));
        assert_eq!(lex_one("0o17").value, Some(TokenValue::Int(15)));
        assert_eq!(lex_one("0b1010").value, Some(TokenValue::Int(10)));
    }

    #[test]
    fn float_literal() {
        let tok = lex_one("3.14");
        assert_eq!(tok.kind, TokenKind::FloatLiteral);
        assert_eq!(tok.value, Some(TokenValue::Float(3.14)));
    }

    #[test]
    fn dot_not_followed_by_digit_is_not_consumed() {
        // "1." with nothing after the dot stays an integer; the '.' token
        // is left for the caller (e.g. field access grammar).
        let tok = lex_one("1.x");
        assert_eq!(tok.kind, TokenKind::IntegerLiteral);
        assert_eq!(tok.value, Some(TokenValue::Int(1)));
    }

    #[test]
    fn leading_zero_then_digit_is_an_error() {
        let handler = Handler::new();
        let err = crate::lexer::core::Lexer::new("01", FileId(0), &handler)
            .next_token()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::BadNumericLiteral);
    }
}
