//! Error types for loading and writing user.js settings
//!
//! Loading has a single failure kind, [`ParseError`], which always carries the
//! line it was raised on. Everything else (file I/O, bad query patterns) goes
//! through the crate-wide [`Error`].

use std::path::PathBuf;

/// A malformed declaration or a duplicate key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Lexical or grammatical error
    #[error("line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The same key declared twice
    #[error("line {line}: duplicate key \"{key}\" (first declared on line {first_line})")]
    DuplicateKey {
        key: String,
        line: usize,
        first_line: usize,
    },
}

impl ParseError {
    pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Line (1-indexed) of the offending declaration
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::DuplicateKey { line, .. } => *line,
        }
    }
}

/// Errors that can occur while loading, querying, or writing settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The settings text could not be loaded
    #[error("Parse error at {0}")]
    Parse(#[from] ParseError),

    /// I/O error while reading or writing a settings file
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid glob pattern in query
    #[error("Invalid glob pattern: {0}")]
    InvalidGlobPattern(String),
}

/// Result type alias for convenience
///
/// # Example
///
/// ```rust
/// use userjs::{load, Result};
///
/// fn count(content: &str) -> Result<usize> {
///     let settings = load(content)?;
///     Ok(settings.len())
/// }
///
/// assert_eq!(count(r#"user_pref("a.b", true);"#).unwrap(), 1);
/// ```
pub type Result<T> = std::result::Result<T, Error>;
