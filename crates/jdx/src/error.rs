//! Error types for jdx operations.
//!
//! - **Format errors** (`Data`, `Format`) abort decoding. There is no partial
//!   model.
//! - **Lookup** and **invalid transition** errors come from queries and
//!   navigation. They are reported to the caller and leave state untouched.

use std::io;
use thiserror::Error;

/// The error type for jdx operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A line of the data file could not be decoded.
    #[error(transparent)]
    Data(#[from] jdx_data::Error),

    /// Records decoded but do not form a consistent graph.
    #[error("line {line}: {message}")]
    Format {
        /// 1-based line (or record) number.
        line: usize,
        /// What was inconsistent.
        message: String,
    },

    /// An index or name does not resolve against the model.
    #[error("not found: {0}")]
    Lookup(String),

    /// A navigation transition is not valid from the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// The attempted transition.
        action: &'static str,
        /// Description of the current state.
        state: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a model-level format error.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create a lookup error.
    pub fn lookup(what: impl Into<String>) -> Self {
        Self::Lookup(what.into())
    }

    /// Returns `true` for errors that make a data file unparsable.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::Data(jdx_data::Error::Format { .. })
        )
    }

    /// Returns `true` for navigation/query errors that leave state untouched.
    #[must_use]
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Self::Lookup(_) | Self::InvalidTransition { .. })
    }
}

/// A specialized Result type for jdx operations.
pub type Result<T> = std::result::Result<T, Error>;
