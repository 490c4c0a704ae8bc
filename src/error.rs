//! Error types for parsing, encoding and Serde conversion.
//!
//! Parsing has a single failure kind, [`Error::Parse`], carrying a message and
//! the 1-based line and column where the parser stopped. There is no partial
//! result: the first error aborts the whole parse.
//!
//! ## Error Categories
//!
//! - **Lexical**: line break inside a single-line string, invalid escape sequence,
//!   unterminated string
//! - **Structural**: empty key name, malformed table path, table redefinition,
//!   newline inside an inline table
//! - **Strict mode**: duplicate key assignment (see [`ParseOptions`](crate::ParseOptions))
//! - **Serde**: values with no document representation, custom messages
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlite::parse;
//!
//! let err = parse("a = 1\na = 2\n").unwrap_err();
//! assert_eq!(err.line(), Some(2));
//! assert_eq!(err.message(), "Cannot redefine key \"a\"");
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed document text.
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// A Rust value that has no representation in a document.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error at the given 1-based position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::Error;
    ///
    /// let err = Error::parse(10, 5, "Empty key name");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates an unsupported type error for values that cannot be encoded.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Line of a parse error, `None` for every other kind.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The bare message, without position information.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Error::Parse { message, .. } => message,
            Error::UnsupportedType(msg) | Error::Io(msg) | Error::Custom(msg) => msg,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
