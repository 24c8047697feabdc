//! Unified error types for linestats.
//!
//! This module provides a single [`LinestatsError`] enum covering every
//! fallible operation in the library: reading export files, building filter
//! configurations and writing output.
//!
//! Parsing itself is **not** fallible. A malformed export still produces a
//! [`ParseResult`](crate::parser::ParseResult); problems with the content are
//! described by its [`ParseReport`](crate::report::ParseReport) instead of an
//! error value.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for linestats operations.
///
/// # Example
///
/// ```rust
/// use linestats::error::Result;
/// use linestats::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, LinestatsError>;

/// The error type for all linestats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LinestatsError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Invalid date in a filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Hour filter outside `0 <= start < end <= 24`.
    #[error("Invalid hour range {start}-{end}. Expected 0 <= start < end <= 24")]
    InvalidHourRange {
        /// First hour included
        start: u32,
        /// First hour excluded
        end: u32,
    },

    /// Unknown or unsupported format name.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for LinestatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        LinestatsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl LinestatsError {
    /// Creates a UTF-8 error with context about what was being decoded.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        LinestatsError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        LinestatsError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid hour range error.
    pub fn invalid_hour_range(start: u32, end: u32) -> Self {
        LinestatsError::InvalidHourRange { start, end }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        LinestatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, LinestatsError::Io(_))
    }

    /// Returns `true` if this is an encoding error.
    pub fn is_utf8(&self) -> bool {
        matches!(self, LinestatsError::Utf8 { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, LinestatsError::InvalidDate { .. })
    }

    /// Returns `true` if this is an hour-range error.
    pub fn is_invalid_hour_range(&self) -> bool {
        matches!(self, LinestatsError::InvalidHourRange { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, LinestatsError::InvalidFormat { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
