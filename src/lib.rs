//! # serde_tomlite
//!
//! A hand-written codec for a practical subset of TOML, with Serde integration.
//!
//! ## What is supported?
//!
//! Documents are made of `key = value` statements grouped under `[table]` and
//! `[[array.of.tables]]` headers. Values are strings (basic, literal and their
//! multi-line forms), integers, floats, booleans, arrays and inline tables.
//! Comments are accepted and discarded: only data round-trips, never
//! formatting.
//!
//! ## Key Features
//!
//! - **Strict by default**: assigning a key twice or redefining a table is a
//!   parse error with a 1-based line and column
//! - **Deterministic output**: keys are sorted, nested tables become `[a.b]`
//!   sections, arrays are laid out one element per line
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ### Working with Tables
//!
//! ```rust
//! use serde_tomlite::{encode, parse, Value};
//!
//! let doc = parse("[server]\nhost = \"localhost\"\nports = [8080, 8081]\n").unwrap();
//! let server = doc.get("server").unwrap();
//! assert_eq!(server.get("host").and_then(Value::as_str), Some("localhost"));
//!
//! let text = encode(&doc);
//! assert_eq!(parse(&text).unwrap(), doc);
//! ```
//!
//! ### Typed Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tomlite::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     retries: u32,
//!     tags: Vec<String>,
//! }
//!
//! let config = Config {
//!     name: "demo".to_string(),
//!     retries: 3,
//!     tags: vec!["a".to_string(), "b".to_string()],
//! };
//!
//! let text = to_string(&config).unwrap();
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ### Dynamic Values with the tomlite! Macro
//!
//! ```rust
//! use serde_tomlite::{tomlite, to_string};
//!
//! let value = tomlite!({
//!     "title": "example",
//!     "owner": { "name": "Tom" }
//! });
//!
//! let text = to_string(&value).unwrap();
//! assert_eq!(text, "title = \"example\"\n\n[owner]\nname = \"Tom\"\n");
//! ```
//!
//! ## Diagnostics
//!
//! Parse and encode calls emit `tracing` events at debug level, and table
//! headers plus lenient-mode overwrites at trace level. The library never
//! installs a subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Typed round trip through a config struct
//! - **`dynamic_values.rs`** - Parsing, editing and re-encoding a `Table`
//! - **`lenient_parsing.rs`** - Strict versus lenient duplicate handling
//!
//! Run any example with: `cargo run --example <name>`

mod cursor;
pub mod de;
mod encoder;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
mod parser;
pub mod ser;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::Table;
pub use options::{EncodeOptions, ParseOptions};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use tracing::debug;

/// Parses document text into its root table, in strict mode.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::parse;
///
/// let table = parse("name = \"demo\"\n[limits]\nmax = 10\n").unwrap();
/// assert_eq!(table.get("limits").and_then(|t| t.get("max")).and_then(|v| v.as_i64()), Some(10));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] at the first syntax error, duplicate key or table
/// redefinition.
pub fn parse(text: &str) -> Result<Table> {
    parse_with_options(text, ParseOptions::default())
}

/// Parses document text with custom options.
///
/// # Errors
///
/// Returns [`Error::Parse`] at the first error; in lenient mode duplicate
/// keys are not errors.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Table> {
    debug!(bytes = text.len(), strict = options.strict, "parsing document");
    let result = parser::parse_document(text, options);
    if let Err(err) = &result {
        debug!(error = %err, "parse failed");
    }
    result
}

/// Checks that `text` parses, discarding the result.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::validate;
///
/// assert!(validate("a = [1, 2]\n").is_ok());
/// assert!(validate("a = [1, 2\n").is_err());
/// ```
///
/// # Errors
///
/// Returns the same error [`parse`] would.
pub fn validate(text: &str) -> Result<()> {
    parse(text).map(|_| ())
}

/// Encodes a root table as document text.
///
/// Encoding is deterministic: the same table always yields byte-identical
/// output regardless of key insertion order.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{encode, Table, Value};
///
/// let mut table = Table::new();
/// table.insert("b".to_string(), Value::from(2));
/// table.insert("a".to_string(), Value::from(1));
///
/// assert_eq!(encode(&table), "a = 1\nb = 2\n");
/// ```
#[must_use]
pub fn encode(root: &Table) -> String {
    encode_with_options(root, &EncodeOptions::default())
}

/// Encodes a root table with custom options.
#[must_use]
pub fn encode_with_options(root: &Table, options: &EncodeOptions) -> String {
    encoder::encode_document(root, options)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_tomlite::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the value is absent (`None` or unit)
/// or contains a map with non-string keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value
        .serialize(ValueSerializer)?
        .ok_or_else(|| Error::unsupported_type("absent value (None or unit) at the top level"))
}

/// Interpret a [`Value`] as an instance of type `T`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_tomlite::{from_value, tomlite};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(tomlite!({ "x": 1, "y": 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value does not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to document text.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_tomlite::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `T` does not serialize to a table,
/// since only a table can be a document root.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to document text with custom options.
///
/// # Errors
///
/// Returns an error if `T` does not serialize to a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Table(root) => Ok(encode_with_options(&root, options)),
        other => Err(Error::unsupported_type(&format!(
            "document root must be a table, found {}",
            other.type_name()
        ))),
    }
}

/// Serialize any `T: Serialize` to a writer as document text.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_tomlite::to_writer;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from document text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_tomlite::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] with line and column information for malformed
/// text, or a deserialization error if the document does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, ParseOptions::default())
}

/// Deserialize an instance of type `T` from document text with custom options.
///
/// # Errors
///
/// Returns an error if the text does not parse or does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let root = parse_with_options(s, options)?;
    from_value(Value::Table(root))
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_tomlite::from_reader;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2\n")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the text does not parse, or it does not
/// match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of document text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, do not parse, or do not
/// match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        home: Option<Point>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            home: Some(Point { x: 3, y: 4 }),
        };

        let text = to_string(&user).unwrap();
        assert!(text.contains("[home]\n"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_absent_field_round_trip() {
        let user = User {
            id: 1,
            name: "Bob".to_string(),
            active: false,
            tags: vec![],
            home: None,
        };

        let text = to_string(&user).unwrap();
        assert!(!text.contains("home"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_non_table_root_is_rejected() {
        assert!(matches!(
            to_string(&vec![1, 2, 3]),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(
            to_value(&Option::<i32>::None),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        assert!(from_slice::<Point>(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_parse_error_passes_through_from_str() {
        let err = from_str::<Point>("x = 1\nx = 2\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_lenient_from_str() {
        let point: Point = from_str_with_options("x = 1\nx = 5\ny = 2\n", ParseOptions::lenient()).unwrap();
        assert_eq!(point, Point { x: 5, y: 2 });
    }

    #[test]
    fn test_custom_indent() {
        #[derive(Serialize)]
        struct Data {
            xs: Vec<u8>,
        }

        let options = EncodeOptions::new().with_indent(4);
        let text = to_string_with_options(&Data { xs: vec![1] }, &options).unwrap();
        assert_eq!(text, "xs = [\n    1,\n]\n");
    }
}
