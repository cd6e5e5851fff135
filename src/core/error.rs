//! Error types for bedtuple
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Errors produced while converting a single line into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BedParseError {
    /// The line has fewer tab-separated tokens than the schema has columns
    #[error("Missing field at column {column_index}")]
    MissingField { column_index: usize },

    /// The token exists but cannot be converted to the column's type
    #[error("Malformed field at column {column_index}: '{raw_token}'")]
    MalformedField {
        column_index: usize,
        raw_token: String,
    },
}

impl BedParseError {
    /// Index of the column that failed
    pub fn column_index(&self) -> usize {
        match self {
            BedParseError::MissingField { column_index }
            | BedParseError::MalformedField { column_index, .. } => *column_index,
        }
    }
}

/// Main error type for stream-level BED operations
#[derive(Debug, Error)]
pub enum BedError {
    /// A line of the stream could not be parsed
    #[error("Invalid BED record at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: BedParseError,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for line parsing
pub type ParseResult<T> = std::result::Result<T, BedParseError>;

/// Result type alias for stream-level operations
pub type Result<T> = std::result::Result<T, BedError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_messages() {
        let missing = BedParseError::MissingField { column_index: 2 };
        assert_eq!(missing.to_string(), "Missing field at column 2");

        let malformed = BedParseError::MalformedField {
            column_index: 1,
            raw_token: "NaN".to_string(),
        };
        assert_eq!(malformed.to_string(), "Malformed field at column 1: 'NaN'");
        assert_eq!(malformed.column_index(), 1);
    }

    #[test]
    fn test_stream_error_keeps_source() {
        let err = BedError::Parse {
            line: 7,
            source: BedParseError::MissingField { column_index: 2 },
        };
        assert_eq!(
            err.to_string(),
            "Invalid BED record at line 7: Missing field at column 2"
        );
        assert!(err.source().is_some());
    }
}
