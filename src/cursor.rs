//! Positional, lookahead-capable access to document text.

use crate::Error;

/// A forward-only cursor over the input text.
///
/// Positions are byte offsets that always sit on a `char` boundary. Line and
/// column are derived from the consumed prefix only when an error is built.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor { input, position: 0 }
    }

    /// The character `offset` positions ahead, or `None` past the end.
    pub(crate) fn peek(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Moves forward by `count` characters, stopping at the end of input.
    pub(crate) fn advance(&mut self, count: usize) {
        for _ in 0..count {
            match self.rest().chars().next() {
                Some(ch) => self.position += ch.len_utf8(),
                None => break,
            }
        }
    }

    /// Consumes and returns the next character.
    pub(crate) fn next_char(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub(crate) fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    /// Consumes spaces and tabs; newlines are left in place.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek(0) {
            if ch == ' ' || ch == '\t' {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    /// Consumes everything up to, not including, the next line break.
    pub(crate) fn skip_comment(&mut self) {
        while let Some(ch) = self.peek(0) {
            if ch == '\n' || (ch == '\r' && self.peek(1) == Some('\n')) {
                break;
            }
            self.position += ch.len_utf8();
        }
    }

    /// `true` if the cursor sits on `\n` or `\r\n`.
    pub(crate) fn at_newline(&self) -> bool {
        self.starts_with("\n") || self.starts_with("\r\n")
    }

    /// Consumes one `\n` or `\r\n`, returning whether one was present.
    pub(crate) fn eat_newline(&mut self) -> bool {
        if self.starts_with("\r\n") {
            self.position += 2;
            true
        } else if self.starts_with("\n") {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// The 1-based line and column of the cursor.
    pub(crate) fn location(&self) -> (usize, usize) {
        let consumed = &self.input[..self.position];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
        let column = consumed[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Builds a parse error at the current position.
    pub(crate) fn error_at(&self, message: impl Into<String>) -> Error {
        let (line, column) = self.location();
        Error::parse(line, column, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_advance() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(0), Some('a'));
        assert_eq!(cursor.peek(1), Some('b'));
        assert_eq!(cursor.peek(2), None);

        cursor.advance(5);
        assert!(cursor.at_end());
        assert_eq!(cursor.peek(0), None);
    }

    #[test]
    fn test_skip_whitespace_stops_at_newline() {
        let mut cursor = Cursor::new(" \t \nx");
        cursor.skip_whitespace();
        assert!(cursor.at_newline());
        assert!(cursor.eat_newline());
        assert_eq!(cursor.peek(0), Some('x'));
    }

    #[test]
    fn test_error_location_counts_lines() {
        let mut cursor = Cursor::new("a = 1\nbc = 2\n");
        cursor.advance(8);
        let err = cursor.error_at("boom");
        assert_eq!(
            err,
            Error::Parse {
                line: 2,
                column: 3,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_multibyte_characters() {
        let mut cursor = Cursor::new("é=1");
        assert_eq!(cursor.next_char(), Some('é'));
        assert_eq!(cursor.peek(0), Some('='));
        assert_eq!(cursor.location(), (1, 2));
    }

    #[test]
    fn test_skip_comment_leaves_crlf() {
        let mut cursor = Cursor::new("# note\r\nx");
        cursor.skip_comment();
        assert!(cursor.at_newline());
    }
}
