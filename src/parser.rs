//! Recursive-descent parser for document text.
//!
//! The parser works in one pass over a [`Cursor`]. The document level handles
//! comments, `[table]` and `[[array.of.tables]]` headers and `key = value`
//! statements; the value level handles strings, numbers, booleans, arrays and
//! inline tables. The first error aborts the parse.
//!
//! Statements are written into the "current table", tracked as a key path
//! from the root. A path segment naming an array created by `[[...]]` headers
//! resolves to the last table in that array.

use crate::cursor::Cursor;
use crate::{Number, ParseOptions, Result, Table, Value};
use std::collections::HashSet;
use tracing::trace;

/// Parses a complete document into its root table.
pub(crate) fn parse_document(input: &str, options: ParseOptions) -> Result<Table> {
    Parser::new(input, options).parse()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    Basic,
    Literal,
}

impl Quote {
    const fn delimiter(self) -> char {
        match self {
            Quote::Basic => '"',
            Quote::Literal => '\'',
        }
    }
}

/// Deepest nesting of arrays and inline tables a value may have.
const MAX_DEPTH: usize = 128;

/// What a `[[path]]` header finds at the end of its path.
enum Slot {
    Vacant,
    TableArray,
    Taken,
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    options: ParseOptions,
    root: Table,
    current: Vec<String>,
    /// Tables created as intermediates of a header and not yet declared by their own.
    implicit: HashSet<Vec<String>>,
    /// Arrays created by `[[...]]` headers.
    table_arrays: HashSet<Vec<String>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(input),
            options,
            root: Table::new(),
            current: Vec::new(),
            implicit: HashSet::new(),
            table_arrays: HashSet::new(),
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<Table> {
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek(0) {
                None => break,
                Some('#') => self.cursor.skip_comment(),
                Some('[') => {
                    self.parse_header()?;
                    self.expect_line_end("table header")?;
                }
                Some('=') => return Err(self.cursor.error_at("Empty key name")),
                Some(_) if self.cursor.eat_newline() => {}
                Some(_) => {
                    self.parse_assignment()?;
                    self.expect_line_end("value")?;
                }
            }
        }
        Ok(self.root)
    }

    /// Only whitespace and a comment may follow a statement on its line.
    fn expect_line_end(&mut self, what: &str) -> Result<()> {
        self.cursor.skip_whitespace();
        if self.cursor.peek(0) == Some('#') {
            self.cursor.skip_comment();
        }
        if self.cursor.at_end() || self.cursor.eat_newline() {
            Ok(())
        } else {
            Err(self
                .cursor
                .error_at(format!("Expected newline after {}", what)))
        }
    }

    fn parse_header(&mut self) -> Result<()> {
        self.cursor.advance(1); // consume '['
        let array = self.cursor.peek(0) == Some('[');
        if array {
            self.cursor.advance(1);
        }

        self.cursor.skip_whitespace();
        if self.cursor.peek(0) == Some(']') {
            return Err(self.cursor.error_at("Malformed table path"));
        }

        let path = self.parse_key_path()?;
        self.cursor.skip_whitespace();

        let close = if array { "]]" } else { "]" };
        if !self.cursor.starts_with(close) {
            return Err(self
                .cursor
                .error_at(format!("Malformed table path, expected '{}'", close)));
        }
        self.cursor.advance(close.len());

        if array {
            self.open_array_table(path)
        } else {
            self.open_table(path)
        }
    }

    fn open_table(&mut self, path: Vec<String>) -> Result<()> {
        let Some(last) = path.last() else {
            return Err(self.cursor.error_at("Malformed table path"));
        };

        let parent = descend(&mut self.root, &path, &mut self.implicit, &self.table_arrays)
            .map_err(|msg| self.cursor.error_at(msg))?;

        match parent.get(last).map(Value::is_table) {
            None => {
                parent.insert(last.clone(), Value::Table(Table::new()));
            }
            Some(true) if self.implicit.remove(&path) => {}
            Some(_) => {
                return Err(self
                    .cursor
                    .error_at(format!("Cannot redefine table \"{}\"", dotted(&path))))
            }
        }

        trace!(path = %dotted(&path), "table header");
        self.current = path;
        Ok(())
    }

    fn open_array_table(&mut self, path: Vec<String>) -> Result<()> {
        let Some(last) = path.last() else {
            return Err(self.cursor.error_at("Malformed table path"));
        };

        let parent = descend(&mut self.root, &path, &mut self.implicit, &self.table_arrays)
            .map_err(|msg| self.cursor.error_at(msg))?;

        let slot = match parent.get(last) {
            None => Slot::Vacant,
            Some(Value::Array(_)) if self.table_arrays.contains(&path) => Slot::TableArray,
            Some(_) => Slot::Taken,
        };

        match slot {
            Slot::Vacant => {
                parent.insert(last.clone(), Value::Array(vec![Value::Table(Table::new())]));
                self.table_arrays.insert(path.clone());
            }
            Slot::TableArray => {
                if let Some(Value::Array(arr)) = parent.get_mut(last) {
                    arr.push(Value::Table(Table::new()));
                }
            }
            Slot::Taken => {
                return Err(self
                    .cursor
                    .error_at(format!("Cannot redefine table \"{}\"", dotted(&path))))
            }
        }

        // Paths below the previous element can no longer be reached.
        self.implicit.retain(|p| !is_below(&path, p));
        self.table_arrays.retain(|p| !is_below(&path, p));

        trace!(path = %dotted(&path), "array of tables header");
        self.current = path;
        Ok(())
    }

    fn parse_assignment(&mut self) -> Result<()> {
        let path = self.parse_key_path()?;
        self.expect_equals(&path)?;

        let strict = self.options.strict;
        let target = table_at(&self.root, &self.current)
            .ok_or_else(|| self.cursor.error_at("Current table is not reachable"))?;
        if let Err(msg) = check_assignable(target, &path, strict) {
            return Err(self.cursor.error_at(msg));
        }

        let value = self.parse_value()?;

        let target = table_at_mut(&mut self.root, &self.current)
            .ok_or_else(|| self.cursor.error_at("Current table is not reachable"))?;
        match assign(target, &path, value) {
            Ok(Some(_)) => {
                let mut full = self.current.clone();
                full.extend(path.iter().cloned());
                // Headers seen under the old value no longer describe the new one.
                self.implicit.retain(|p| *p != full && !is_below(&full, p));
                self.table_arrays.retain(|p| *p != full && !is_below(&full, p));
                trace!(key = %dotted(&path), "overwrote existing key");
            }
            Ok(None) => {}
            Err(msg) => return Err(self.cursor.error_at(msg)),
        }
        Ok(())
    }

    fn expect_equals(&mut self, path: &[String]) -> Result<()> {
        self.cursor.skip_whitespace();
        if self.cursor.peek(0) != Some('=') {
            return Err(self
                .cursor
                .error_at(format!("Expected '=' after key \"{}\"", dotted(path))));
        }
        self.cursor.advance(1);
        self.cursor.skip_whitespace();
        Ok(())
    }

    /// Parses `segment ('.' segment)*`, where a segment is bare or quoted.
    fn parse_key_path(&mut self) -> Result<Vec<String>> {
        let mut path = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            let segment = match self.cursor.peek(0) {
                Some('"') => {
                    self.cursor.advance(1);
                    self.parse_single_line_string(Quote::Basic)?
                }
                Some('\'') => {
                    self.cursor.advance(1);
                    self.parse_single_line_string(Quote::Literal)?
                }
                _ => self.parse_bare_key()?,
            };
            path.push(segment);

            self.cursor.skip_whitespace();
            if self.cursor.peek(0) == Some('.') {
                self.cursor.advance(1);
            } else {
                return Ok(path);
            }
        }
    }

    fn parse_bare_key(&mut self) -> Result<String> {
        let rest = self.cursor.rest();
        let end = rest.find(is_key_terminator).unwrap_or(rest.len());
        let key = rest[..end].trim();
        if key.is_empty() {
            return Err(self.cursor.error_at("Empty key name"));
        }
        self.cursor.advance(rest[..end].chars().count());
        Ok(key.to_string())
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.cursor.peek(0) {
            Some('"') | Some('\'') => Ok(Value::String(self.parse_string()?)),
            Some('[') => self.nested(Self::parse_array),
            Some('{') => self.nested(Self::parse_inline_table),
            Some('t') | Some('f') => Ok(Value::Boolean(self.parse_bool()?)),
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'i' | 'n') => {
                Ok(Value::Number(self.parse_number()?))
            }
            Some(ch) if ch != '\n' && ch != '\r' => Err(self
                .cursor
                .error_at(format!("Unexpected character '{}'", ch.escape_debug()))),
            _ => Err(self.cursor.error_at("Expected value")),
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(self.cursor.error_at("Nesting too deep"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = if self.cursor.peek(0) == Some('"') {
            Quote::Basic
        } else {
            Quote::Literal
        };
        let delimiter = quote.delimiter();

        if self.cursor.peek(1) == Some(delimiter) && self.cursor.peek(2) == Some(delimiter) {
            self.cursor.advance(3);
            self.parse_multi_line_string(quote)
        } else {
            self.cursor.advance(1);
            self.parse_single_line_string(quote)
        }
    }

    /// Reads up to the closing delimiter; the opening one is already consumed.
    fn parse_single_line_string(&mut self, quote: Quote) -> Result<String> {
        let mut result = String::new();
        loop {
            if self.cursor.at_newline() {
                return Err(self
                    .cursor
                    .error_at("Single-line string cannot contain line break"));
            }
            match self.cursor.next_char() {
                None => return Err(self.cursor.error_at("Unterminated string")),
                Some(ch) if ch == quote.delimiter() => return Ok(result),
                Some('\\') if quote == Quote::Basic => result.push(self.parse_escape()?),
                Some(ch) => result.push(ch),
            }
        }
    }

    fn parse_multi_line_string(&mut self, quote: Quote) -> Result<String> {
        // A newline right after the opening delimiter is not part of the value.
        self.cursor.eat_newline();

        let delimiter = quote.delimiter();
        let mut result = String::new();
        loop {
            if self.cursor.peek(0) == Some(delimiter)
                && self.cursor.peek(1) == Some(delimiter)
                && self.cursor.peek(2) == Some(delimiter)
            {
                self.cursor.advance(3);
                return Ok(result);
            }
            match self.cursor.next_char() {
                None => return Err(self.cursor.error_at("Unterminated multi-line string")),
                Some('\\') if quote == Quote::Basic => result.push(self.parse_escape()?),
                Some(ch) => result.push(ch),
            }
        }
    }

    /// Decodes the character after a backslash.
    fn parse_escape(&mut self) -> Result<char> {
        let ch = match self.cursor.peek(0) {
            Some('b') => '\u{0008}',
            Some('t') => '\t',
            Some('n') => '\n',
            Some('f') => '\u{000C}',
            Some('r') => '\r',
            Some('"') => '"',
            Some('\\') => '\\',
            Some(other) => {
                return Err(self.cursor.error_at(format!(
                    "Invalid escape sequence \"\\{}\"",
                    other.escape_debug()
                )))
            }
            None => return Err(self.cursor.error_at("Unterminated string")),
        };
        self.cursor.advance(1);
        Ok(ch)
    }

    fn parse_number(&mut self) -> Result<Number> {
        let sign_len = usize::from(matches!(self.cursor.peek(0), Some('+') | Some('-')));
        if matches!(self.cursor.peek(sign_len), Some('i') | Some('n')) {
            return self.parse_special_float();
        }

        let rest = self.cursor.rest();
        let end = rest
            .find(|ch: char| !is_number_char(ch))
            .unwrap_or(rest.len());
        let literal = &rest[..end];
        let digits: String = literal.chars().filter(|&ch| ch != '_').collect();

        let number = if digits.contains(|ch: char| matches!(ch, '.' | 'e' | 'E')) {
            digits.parse::<f64>().ok().map(Number::Float)
        } else {
            digits.parse::<i64>().ok().map(Number::Integer)
        };

        match number {
            Some(number) => {
                // The number alphabet is ASCII, so bytes and chars agree.
                self.cursor.advance(end);
                Ok(number)
            }
            None => Err(self
                .cursor
                .error_at(format!("Invalid number \"{}\"", literal))),
        }
    }

    fn parse_special_float(&mut self) -> Result<Number> {
        let negative = self.cursor.peek(0) == Some('-');
        if matches!(self.cursor.peek(0), Some('+') | Some('-')) {
            self.cursor.advance(1);
        }

        let value = if self.cursor.starts_with("inf") {
            f64::INFINITY
        } else if self.cursor.starts_with("nan") {
            f64::NAN
        } else {
            return Err(self.cursor.error_at("Invalid number"));
        };
        self.cursor.advance(3);
        self.expect_word_end("Invalid number")?;

        Ok(Number::Float(if negative { -value } else { value }))
    }

    fn parse_bool(&mut self) -> Result<bool> {
        let value = if self.cursor.starts_with("true") {
            self.cursor.advance(4);
            true
        } else if self.cursor.starts_with("false") {
            self.cursor.advance(5);
            false
        } else {
            return Err(self
                .cursor
                .error_at("Invalid boolean, expected 'true' or 'false'"));
        };
        self.expect_word_end("Invalid boolean, expected 'true' or 'false'")?;
        Ok(value)
    }

    /// Rejects keyword literals that run into further identifier characters.
    fn expect_word_end(&self, message: &str) -> Result<()> {
        match self.cursor.peek(0) {
            Some(ch) if ch.is_alphanumeric() || ch == '_' => Err(self.cursor.error_at(message)),
            _ => Ok(()),
        }
    }

    /// Elements are separated by commas and/or newlines; trailing separators are allowed.
    fn parse_array(&mut self) -> Result<Value> {
        self.cursor.advance(1); // consume '['
        let mut elements = Vec::new();

        loop {
            self.skip_array_trivia();
            match self.cursor.peek(0) {
                None => return Err(self.cursor.error_at("Unterminated array")),
                Some(']') => {
                    self.cursor.advance(1);
                    return Ok(Value::Array(elements));
                }
                _ => {}
            }

            elements.push(self.parse_value()?);

            self.cursor.skip_whitespace();
            match self.cursor.peek(0) {
                Some(',') => self.cursor.advance(1),
                Some(']') | Some('#') => {}
                _ if self.cursor.at_newline() => {}
                None => return Err(self.cursor.error_at("Unterminated array")),
                Some(ch) => {
                    return Err(self.cursor.error_at(format!(
                        "Expected ',' or ']' in array, found '{}'",
                        ch.escape_debug()
                    )))
                }
            }
        }
    }

    fn skip_array_trivia(&mut self) {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.peek(0) == Some('#') {
                self.cursor.skip_comment();
            }
            if !self.cursor.eat_newline() {
                break;
            }
        }
    }

    fn parse_inline_table(&mut self) -> Result<Value> {
        self.cursor.advance(1); // consume '{'
        let mut table = Table::new();

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.at_newline() {
                return Err(self.cursor.error_at("Newline not allowed in inline table"));
            }
            match self.cursor.peek(0) {
                None => return Err(self.cursor.error_at("Unterminated inline table")),
                Some('}') => {
                    self.cursor.advance(1);
                    return Ok(Value::Table(table));
                }
                _ => {}
            }

            let path = self.parse_key_path()?;
            self.expect_equals(&path)?;
            if let Err(msg) = check_assignable(&table, &path, self.options.strict) {
                return Err(self.cursor.error_at(msg));
            }
            let value = self.parse_value()?;
            if let Err(msg) = assign(&mut table, &path, value) {
                return Err(self.cursor.error_at(msg));
            }

            self.cursor.skip_whitespace();
            if self.cursor.at_newline() {
                return Err(self.cursor.error_at("Newline not allowed in inline table"));
            }
            match self.cursor.peek(0) {
                Some(',') => self.cursor.advance(1),
                Some('}') => {}
                None => return Err(self.cursor.error_at("Unterminated inline table")),
                Some(ch) => {
                    return Err(self.cursor.error_at(format!(
                        "Expected ',' or '}}' in inline table, found '{}'",
                        ch.escape_debug()
                    )))
                }
            }
        }
    }
}

fn is_key_terminator(ch: char) -> bool {
    matches!(
        ch,
        '.' | '=' | '[' | ']' | '{' | '}' | ',' | '#' | '"' | '\'' | '\n' | '\r'
    )
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E' | '_')
}

fn dotted(path: &[String]) -> String {
    path.join(".")
}

/// `true` if `path` lies strictly below `ancestor`.
fn is_below(ancestor: &[String], path: &[String]) -> bool {
    path.len() > ancestor.len() && path.starts_with(ancestor)
}

fn table_at<'t>(root: &'t Table, path: &[String]) -> Option<&'t Table> {
    let mut current = root;
    for segment in path {
        current = match current.get(segment)? {
            Value::Table(table) => table,
            Value::Array(arr) => arr.last()?.as_table()?,
            _ => return None,
        };
    }
    Some(current)
}

fn table_at_mut<'t>(root: &'t mut Table, path: &[String]) -> Option<&'t mut Table> {
    let mut current = root;
    for segment in path {
        current = match current.get_mut(segment)? {
            Value::Table(table) => table,
            Value::Array(arr) => arr.last_mut()?.as_table_mut()?,
            _ => return None,
        };
    }
    Some(current)
}

/// Walks a header path up to its last segment, creating missing tables.
fn descend<'t>(
    root: &'t mut Table,
    path: &[String],
    implicit: &mut HashSet<Vec<String>>,
    table_arrays: &HashSet<Vec<String>>,
) -> std::result::Result<&'t mut Table, String> {
    let parents = &path[..path.len().saturating_sub(1)];
    let mut current = root;

    for (i, segment) in parents.iter().enumerate() {
        let prefix = &path[..=i];
        if !current.contains_key(segment) {
            current.insert(segment.clone(), Value::Table(Table::new()));
            implicit.insert(prefix.to_vec());
        }

        let through_array = table_arrays.contains(prefix);
        current = match current.get_mut(segment) {
            Some(Value::Table(table)) => table,
            Some(Value::Array(arr)) if through_array => match arr.last_mut() {
                Some(Value::Table(table)) => table,
                _ => return Err(format!("Cannot use key \"{}\" as a table", dotted(prefix))),
            },
            _ => return Err(format!("Cannot use key \"{}\" as a table", dotted(prefix))),
        };
    }

    Ok(current)
}

/// Checks a `key = value` target before the value is parsed.
fn check_assignable(
    table: &Table,
    path: &[String],
    strict: bool,
) -> std::result::Result<(), String> {
    let Some((last, parents)) = path.split_last() else {
        return Err("Empty key name".to_string());
    };

    let mut current = table;
    for (i, segment) in parents.iter().enumerate() {
        match current.get(segment) {
            None => return Ok(()),
            Some(Value::Table(table)) => current = table,
            Some(_) => {
                return Err(format!(
                    "Cannot use key \"{}\" as a table",
                    dotted(&path[..=i])
                ))
            }
        }
    }

    if strict && current.contains_key(last) {
        return Err(format!("Cannot redefine key \"{}\"", dotted(path)));
    }
    Ok(())
}

/// Stores `value` under a dotted path, creating intermediate tables.
fn assign(
    table: &mut Table,
    path: &[String],
    value: Value,
) -> std::result::Result<Option<Value>, String> {
    let Some((last, parents)) = path.split_last() else {
        return Err("Empty key name".to_string());
    };

    let mut current = table;
    for (i, segment) in parents.iter().enumerate() {
        if !current.contains_key(segment) {
            current.insert(segment.clone(), Value::Table(Table::new()));
        }
        current = match current.get_mut(segment) {
            Some(Value::Table(table)) => table,
            _ => {
                return Err(format!(
                    "Cannot use key \"{}\" as a table",
                    dotted(&path[..=i])
                ))
            }
        };
    }

    Ok(current.insert(last.clone(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn parse(input: &str) -> Result<Table> {
        parse_document(input, ParseOptions::default())
    }

    fn parse_value(input: &str) -> Result<Value> {
        let doc = parse(&format!("v = {}\n", input))?;
        Ok(doc.get("v").cloned().unwrap())
    }

    fn message(err: Error) -> String {
        err.message().to_string()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse_value("\"hi\"").unwrap(), Value::from("hi"));
        assert_eq!(parse_value("'C:\\path'").unwrap(), Value::from("C:\\path"));
        assert_eq!(parse_value("42").unwrap(), Value::from(42));
        assert_eq!(parse_value("-17").unwrap(), Value::from(-17));
        assert_eq!(parse_value("+3").unwrap(), Value::from(3));
        assert_eq!(parse_value("3.5").unwrap(), Value::from(3.5));
        assert_eq!(parse_value("true").unwrap(), Value::from(true));
        assert_eq!(parse_value("false").unwrap(), Value::from(false));
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(parse_value("1_000_000").unwrap(), Value::from(1_000_000));
        assert_eq!(parse_value("1e3").unwrap(), Value::from(1000.0));
        assert_eq!(parse_value("6.25E-2").unwrap(), Value::from(0.0625));
        assert_eq!(parse_value("-0.5").unwrap(), Value::from(-0.5));
        assert_eq!(parse_value("inf").unwrap(), Value::from(f64::INFINITY));
        assert_eq!(parse_value("-inf").unwrap(), Value::from(f64::NEG_INFINITY));
        assert!(parse_value("nan").unwrap().as_f64().unwrap().is_nan());
    }

    #[test]
    fn test_malformed_numbers_fail() {
        assert_eq!(
            message(parse_value("1.2.3").unwrap_err()),
            "Invalid number \"1.2.3\""
        );
        assert!(parse_value("--1").is_err());
        assert!(parse_value("99999999999999999999").is_err());
        assert!(parse_value("infinity").is_err());
    }

    #[test]
    fn test_invalid_boolean() {
        assert!(parse_value("tru").is_err());
        assert!(parse_value("falsey").is_err());
    }

    #[test]
    fn test_basic_string_escapes() {
        let value = parse_value(r#""a\tb\nc\\d\"e\bf\fg\rh""#).unwrap();
        assert_eq!(value, Value::from("a\tb\nc\\d\"e\u{8}f\u{c}g\rh"));
    }

    #[test]
    fn test_invalid_escape() {
        let err = parse_value(r#""\x41""#).unwrap_err();
        assert_eq!(err.message(), "Invalid escape sequence \"\\x\"");
    }

    #[test]
    fn test_single_line_string_rejects_line_break() {
        let err = parse("a = \"one\ntwo\"\n").unwrap_err();
        assert_eq!(err.message(), "Single-line string cannot contain line break");
        assert_eq!(err.line(), Some(1));

        assert!(parse("a = 'one\ntwo'\n").is_err());
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(message(parse("a = \"open").unwrap_err()), "Unterminated string");
        assert_eq!(
            message(parse("a = \"\"\"open\n").unwrap_err()),
            "Unterminated multi-line string"
        );
    }

    #[test]
    fn test_multi_line_strings() {
        let doc = parse("a = \"\"\"\nline1\nline2\"\"\"\nb = '''\nraw \\n text\n'''\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::from("line1\nline2")));
        assert_eq!(doc.get("b"), Some(&Value::from("raw \\n text\n")));
    }

    #[test]
    fn test_multi_line_string_trims_only_one_newline() {
        let doc = parse("a = \"\"\"\n\nx\"\"\"\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::from("\nx")));

        let doc = parse("a = \"\"\"\r\nx\"\"\"\r\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::from("x")));
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(parse_value("\"\"").unwrap(), Value::from(""));
        assert_eq!(parse_value("''").unwrap(), Value::from(""));
        assert_eq!(parse_value("\"\"\"\"\"\"").unwrap(), Value::from(""));
    }

    #[test]
    fn test_arrays_with_commas_and_newlines() {
        let value = parse_value("[\n  1,\n  2\n  3,\n]").unwrap();
        assert_eq!(
            value,
            Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
        );
        assert_eq!(parse_value("[]").unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn test_array_comments_and_nesting() {
        let value = parse_value("[ # first\n  [1, 2], # pair\n  \"x\",\n]").unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Array(vec![Value::from(1), Value::from(2)]),
                Value::from("x"),
            ])
        );
    }

    #[test]
    fn test_array_errors() {
        assert_eq!(message(parse("a = [1, 2").unwrap_err()), "Unterminated array");
        assert!(parse("a = [1 2]\n").is_err());
        assert!(parse("a = [,]\n").is_err());
    }

    #[test]
    fn test_nesting_depth_limit() {
        let err = parse(&format!("a = {}\n", "[".repeat(200_000))).unwrap_err();
        assert_eq!(err.message(), "Nesting too deep");

        let err = parse(&format!("a = {}\n", "{ b = ".repeat(1_000))).unwrap_err();
        assert_eq!(err.message(), "Nesting too deep");

        let deep = format!("a = {}{}\n", "[".repeat(100), "]".repeat(100));
        assert!(parse(&deep).is_ok());
    }

    #[test]
    fn test_inline_tables() {
        let value = parse_value("{ name = \"apple\", size.width = 3, \"quoted key\" = true, }").unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.get("name"), Some(&Value::from("apple")));
        assert_eq!(
            table.get("size").and_then(|v| v.get("width")),
            Some(&Value::from(3))
        );
        assert_eq!(table.get("quoted key"), Some(&Value::from(true)));
        assert_eq!(parse_value("{}").unwrap(), Value::Table(Table::new()));
    }

    #[test]
    fn test_inline_table_rejects_newline() {
        let err = parse("a = { x = 1,\n y = 2 }\n").unwrap_err();
        assert_eq!(err.message(), "Newline not allowed in inline table");
    }

    #[test]
    fn test_inline_table_allows_multi_line_array_values() {
        let value = parse_value("{ xs = [\n  1,\n  2,\n] }").unwrap();
        assert_eq!(
            value.get("xs"),
            Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
        );
    }

    #[test]
    fn test_inline_table_duplicate_key() {
        assert!(parse("a = { x = 1, x = 2 }\n").is_err());
        let doc = parse_document("a = { x = 1, x = 2 }\n", ParseOptions::lenient()).unwrap();
        assert_eq!(doc.get("a").and_then(|a| a.get("x")), Some(&Value::from(2)));
    }

    #[test]
    fn test_comments_are_discarded() {
        let doc = parse("# header\na = 1 # trailing\n\n  # indented\nb = \"# not a comment\"\n").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("b"), Some(&Value::from("# not a comment")));
    }

    #[test]
    fn test_empty_key_name() {
        assert_eq!(message(parse("= 1\n").unwrap_err()), "Empty key name");
        assert_eq!(message(parse("a. = 1\n").unwrap_err()), "Empty key name");
    }

    #[test]
    fn test_bare_keys_are_trimmed() {
        let doc = parse("  spaced key   = 1\n").unwrap();
        assert_eq!(doc.get("spaced key"), Some(&Value::from(1)));
    }

    #[test]
    fn test_missing_equals() {
        let err = parse("name \"x\"\n").unwrap_err();
        assert_eq!(err.message(), "Expected '=' after key \"name\"");
    }

    #[test]
    fn test_trailing_garbage_after_value() {
        let err = parse("a = 1 2\n").unwrap_err();
        assert_eq!(err.message(), "Expected newline after value");
    }

    #[test]
    fn test_dotted_keys_create_tables() {
        let doc = parse("a.b.c = 1\na.b.d = 2\n").unwrap();
        let b = doc.get("a").and_then(|a| a.get("b")).unwrap();
        assert_eq!(b.get("c"), Some(&Value::from(1)));
        assert_eq!(b.get("d"), Some(&Value::from(2)));
    }

    #[test]
    fn test_dotted_key_through_scalar_fails() {
        let err = parse("a = 1\na.b = 2\n").unwrap_err();
        assert_eq!(err.message(), "Cannot use key \"a\" as a table");
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_duplicate_key_strict_and_lenient() {
        let err = parse("a = 1\na = 2\n").unwrap_err();
        assert_eq!(err.message(), "Cannot redefine key \"a\"");
        assert_eq!(err.line(), Some(2));

        let doc = parse_document("a = 1\na = 2\n", ParseOptions::lenient()).unwrap();
        assert_eq!(doc.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn test_lenient_overwrite_of_table_array() {
        let input = "[[t.arr]]\n[t]\narr = [1]\n[[t.arr]]\n";
        let err = parse_document(input, ParseOptions::lenient()).unwrap_err();
        assert_eq!(err.message(), "Cannot redefine table \"t.arr\"");
        assert_eq!(err.line(), Some(4));

        let input = "[a.b.c]\n[a]\nb = {}\n[a.b]\n";
        let err = parse_document(input, ParseOptions::lenient()).unwrap_err();
        assert_eq!(err.message(), "Cannot redefine table \"a.b\"");
    }

    #[test]
    fn test_table_headers() {
        let doc = parse("top = 0\n[server]\nhost = \"localhost\"\n[server.tls]\nenabled = true\n").unwrap();
        assert_eq!(doc.get("top"), Some(&Value::from(0)));
        let server = doc.get("server").unwrap();
        assert_eq!(server.get("host"), Some(&Value::from("localhost")));
        assert_eq!(
            server.get("tls").and_then(|t| t.get("enabled")),
            Some(&Value::from(true))
        );
    }

    #[test]
    fn test_quoted_header_segments() {
        let doc = parse("[\"a.b\".'c d']\nx = 1\n").unwrap();
        let inner = doc.get("a.b").and_then(|t| t.get("c d")).unwrap();
        assert_eq!(inner.get("x"), Some(&Value::from(1)));
    }

    #[test]
    fn test_table_redefinition() {
        let err = parse("[fruit]\nname = \"apple\"\n\n[fruit]\nname = \"banana\"\n").unwrap_err();
        assert!(err.message().contains("Cannot redefine table"));
        assert_eq!(err.line(), Some(4));

        // Lenient mode still rejects it
        assert!(parse_document("[a]\n[a]\n", ParseOptions::lenient()).is_err());
    }

    #[test]
    fn test_implicit_table_declared_later() {
        let doc = parse("[a.b]\nx = 1\n[a]\ny = 2\n").unwrap();
        let a = doc.get("a").unwrap();
        assert_eq!(a.get("y"), Some(&Value::from(2)));
        assert_eq!(a.get("b").and_then(|b| b.get("x")), Some(&Value::from(1)));

        assert!(parse("[a.b]\n[a]\n[a]\n").is_err());
    }

    #[test]
    fn test_header_over_scalar_or_inline_table() {
        assert!(parse("a = 1\n[a]\n").is_err());
        assert!(parse("a = { x = 1 }\n[a]\n").is_err());
        assert!(parse("a = 1\n[a.b]\n").is_err());
    }

    #[test]
    fn test_malformed_headers() {
        assert_eq!(message(parse("[]\n").unwrap_err()), "Malformed table path");
        assert!(parse("[a\n").is_err());
        assert!(parse("[[a]\n").is_err());
        assert_eq!(message(parse("[a.]\n").unwrap_err()), "Empty key name");
    }

    #[test]
    fn test_array_of_tables() {
        let doc = parse(
            "[[fruit]]\nname = \"apple\"\n[fruit.physical]\ncolor = \"red\"\n\n[[fruit]]\nname = \"banana\"\n[fruit.physical]\ncolor = \"yellow\"\n",
        )
        .unwrap();

        let fruit = doc.get("fruit").and_then(Value::as_array).unwrap();
        assert_eq!(fruit.len(), 2);
        assert_eq!(fruit[0].get("name"), Some(&Value::from("apple")));
        assert_eq!(
            fruit[1].get("physical").and_then(|p| p.get("color")),
            Some(&Value::from("yellow"))
        );
    }

    #[test]
    fn test_nested_array_of_tables() {
        let doc = parse("[[a]]\n[[a.b]]\nx = 1\n[[a.b]]\nx = 2\n[[a]]\n[[a.b]]\nx = 3\n").unwrap();
        let a = doc.get("a").and_then(Value::as_array).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].get("b").and_then(Value::as_array).map(Vec::len), Some(2));
        assert_eq!(a[1].get("b").and_then(Value::as_array).map(Vec::len), Some(1));
    }

    #[test]
    fn test_array_of_tables_conflicts() {
        assert!(parse("a = [1]\n[[a]]\n").is_err());
        assert!(parse("[a]\n[[a]]\n").is_err());
        assert!(parse("[[a]]\n[a]\n").is_err());
        assert!(parse("a = [{ x = 1 }]\n[a.b]\n").is_err());
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse("a = 1\r\n[t]\r\nb = [\r\n  2,\r\n]\r\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::from(1)));
        assert_eq!(
            doc.get("t").and_then(|t| t.get("b")),
            Some(&Value::Array(vec![Value::from(2)]))
        );
    }

    #[test]
    fn test_error_line_numbers() {
        let err = parse("a = 1\nb = 2\n\nc = \"bad\\q\"\n").unwrap_err();
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n# only comments\n").unwrap().is_empty());
    }
}
