//! Error types for filename parsing and document store access.

use crate::filename::EXPECTED_PATTERN;

/// A filename that does not follow the mapping-sheet naming convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    /// The filename does not match the expected pattern.
    #[error(
        "Filename '{filename}' does not match expected pattern: '{}'",
        EXPECTED_PATTERN
    )]
    PatternMismatch {
        /// The rejected filename.
        filename: String,
    },
}

/// Failure talking to the document store.
///
/// Never retried; surfaced to the caller of the lookup.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store connection is not configured or the configuration is invalid.
    #[error("{0}")]
    Config(String),

    /// The request could not be sent or the response could not be read.
    #[error("document store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("document store returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Store error code, when the body carried one.
        code: Option<String>,
        /// Store error message, or the raw body.
        message: String,
    },

    /// The response body was not a valid query result.
    #[error("invalid document store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
