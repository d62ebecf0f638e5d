//! Error types for jdx-data operations.

use std::io;
use thiserror::Error;

/// The error type for jdx-data operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be decoded. Fatal for the whole file.
    #[error("line {line}: {message}")]
    Format {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
}

impl Error {
    /// Create a format error for the given line.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Returns the line number for format errors.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

/// A specialized Result type for jdx-data operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_display_includes_line() {
        let err = Error::format(7, "unknown tag 'X'");
        assert_eq!(err.to_string(), "line 7: unknown tag 'X'");
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn io_error_has_no_line() {
        let err = Error::from(io::Error::other("boom"));
        assert!(err.line().is_none());
    }
}
