//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid object id: {0:?} (expected 24 hex characters)")]
    InvalidObjectId(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid operator token: {0}")]
    InvalidToken(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
