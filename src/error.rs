//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular crates
//! like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - Parsing errors abort the whole file: a table is either complete or absent
//! - Heuristic misclassification (media/system) is never an error
//! - Aggregations over an empty table return empty results instead of failing

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::ChatTable;
///
/// fn my_function() -> Result<ChatTable> {
///     Ok(ChatTable::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// The requested export file does not exist.
    #[error("Chat file not found: {}", path.display())]
    MissingFile {
        /// The path that was requested
        path: PathBuf,
    },

    /// A header line carried a timestamp that no known format could parse.
    ///
    /// This is fatal for the whole parse: no partial table is returned.
    #[error("Could not parse timestamp '{raw}' on line {line}")]
    TimestampFormat {
        /// The timestamp text captured from the header line
        raw: String,
        /// 1-based physical line number in the input
        line: usize,
    },

    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - Permission denied
    /// - The input is not valid UTF-8
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An unknown output format or file extension.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A grammar descriptor's pattern failed to compile.
    #[error("Invalid grammar pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error while converting output buffers.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a missing file error.
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        ChatlensError::MissingFile { path: path.into() }
    }

    /// Creates a timestamp format error.
    pub fn timestamp_format(raw: impl Into<String>, line: usize) -> Self {
        ChatlensError::TimestampFormat {
            raw: raw.into(),
            line,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if the input file was missing.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, ChatlensError::MissingFile { .. })
    }

    /// Returns `true` if a header timestamp could not be parsed.
    pub fn is_timestamp_format(&self) -> bool {
        matches!(self, ChatlensError::TimestampFormat { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }
}
