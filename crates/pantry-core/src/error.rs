//! Error types for the pantry food search engine.

use thiserror::Error;

/// Result type alias using pantry's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pantry operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Provider communication failed for a reason other than transport
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The provider does not offer the requested capability
    #[error("Unsupported capability: {0}")]
    UnsupportedCapability(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether a provider tier should treat this error as "zero results" and
    /// let the next tier attempt the query.
    pub fn is_fallback_trigger(&self) -> bool {
        matches!(
            self,
            Error::Database(_)
                | Error::Request(_)
                | Error::Serialization(_)
                | Error::Retrieval(_)
                | Error::UnsupportedCapability(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Serialization(e.to_string())
        } else {
            Error::Request(e.to_string())
        }
    }
}
