//! Configuration options for parsing and encoding.
//!
//! - [`ParseOptions`]: strict or lenient handling of duplicate keys
//! - [`EncodeOptions`]: indentation of multi-line arrays
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlite::{parse_with_options, ParseOptions};
//!
//! // Lenient mode: the last assignment wins
//! let table = parse_with_options("a = 1\na = 2\n", ParseOptions::lenient()).unwrap();
//! assert_eq!(table.get("a").and_then(|v| v.as_i64()), Some(2));
//! ```

/// Options controlling the parser.
///
/// Strict mode (the default) rejects assigning a key that already exists on
/// the current table. Lenient mode silently overwrites it instead. Table
/// redefinition through headers is rejected in both modes.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::ParseOptions;
///
/// assert!(ParseOptions::new().strict);
/// assert!(!ParseOptions::lenient().strict);
/// assert!(!ParseOptions::new().with_strict(false).strict);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { strict: true }
    }
}

impl ParseOptions {
    /// Creates default options (strict mode).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that overwrite duplicate keys instead of failing.
    #[must_use]
    pub fn lenient() -> Self {
        ParseOptions { strict: false }
    }

    /// Sets whether duplicate keys are an error.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Options controlling the encoder.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{encode_with_options, EncodeOptions, Table, Value};
///
/// let mut table = Table::new();
/// table.insert("xs".to_string(), Value::Array(vec![Value::from(1)]));
///
/// let options = EncodeOptions::new().with_indent(4);
/// assert_eq!(encode_with_options(&table, &options), "xs = [\n    1,\n]\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces added per array nesting level.
    pub indent: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { indent: 2 }
    }
}

impl EncodeOptions {
    /// Creates default options (2-space array indentation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation step for array elements.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
