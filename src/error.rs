//! Error types for dramatis.

use thiserror::Error;

/// Result type for dramatis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for dramatis operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A phase was invoked before the phase it depends on.
    #[error("State error: {0}")]
    State(String),

    /// An internal lookup referenced a character absent from the store.
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be used (e.g. an invalid pattern).
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error raised by an external analysis or reference-data capability,
    /// passed through unchanged.
    #[error(transparent)]
    External(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl From<dramatis_core::Error> for Error {
    fn from(err: dramatis_core::Error) -> Self {
        match err {
            dramatis_core::Error::State(msg) => Error::State(msg),
            dramatis_core::Error::Invariant(msg) => Error::Invariant(msg),
            dramatis_core::Error::InvalidInput(msg) => Error::InvalidInput(msg),
            other => Error::Invariant(other.to_string()),
        }
    }
}

impl Error {
    /// Create a state error.
    pub fn state(msg: impl Into<String>) -> Self {
        Error::State(msg.into())
    }

    /// Create an invariant violation error.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Error::Invariant(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Wrap an error from an external capability.
    pub fn external(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::External(Box::new(err))
    }
}
