//! Error types for dramatis-core.

use thiserror::Error;

/// Result type for dramatis-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for dramatis-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A lookup referenced a name or id that is not in the store.
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// A write-once field was written twice, or read before being written.
    #[error("State error: {0}")]
    State(String),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invariant violation error.
    #[must_use]
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Create a state error.
    #[must_use]
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }
}
