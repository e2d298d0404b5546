//! Character cursor for traversing source code.
//!
//! The cursor is the only thing in `wispc-lex` that deals with raw UTF-8
//! byte offsets vs. character counts; everything above it (`Lexer` and its
//! scanning submodules) only sees `char`s and byte offsets for spans.

pub const EOF_CHAR: char = '\0';

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn position(&self) -> u32 {
        self.position as u32
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Current character, or `'\0'` at end of input (spec.md's lookahead
    /// `peek(0)`).
    pub fn current(&self) -> char {
        self.source[self.position..].chars().next().unwrap_or(EOF_CHAR)
    }

    /// One character of lookahead past the current character (spec.md's
    /// `peek(1)`).
    pub fn peek_next(&self) -> char {
        let mut chars = self.source[self.position..].chars();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    /// Consumes and returns the current character, advancing line/column
    /// bookkeeping.
    pub fn advance(&mut self) -> char {
        let c = self.current();
        if c == EOF_CHAR && self.is_at_end() {
            return c;
        }
        self.position += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    /// Consumes the current character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.current() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_line_and_column_across_newlines() {
        let mut cursor = Cursor::new("ab\ncd");
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
        cursor.advance();
        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
        cursor.advance(); // consumes '\n'
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
    }

    #[test]
    fn current_is_nul_at_end() {
        let mut cursor = Cursor::new("a");
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current(), EOF_CHAR);
    }

    #[test]
    fn peek_next_looks_one_char_ahead() {
        let cursor = Cursor::new("xy");
        assert_eq!(cursor.current(), 'x');
        assert_eq!(cursor.peek_next(), 'y');
    }
}
