//! Error types for argon2-refiner

use thiserror::Error;

/// Main error type for recommender operations
#[derive(Debug, Error)]
pub enum RefinerError {
    /// Backend name not recognized by [`crate::Backend`]
    #[error("invalid backend: {0}")]
    InvalidBackend(String),

    /// Request rate passed to the requests-per-second constructor was
    /// zero or negative
    #[error("requests per second cannot be zero or negative (got {0})")]
    InvalidRequestRate(i32),
}

/// Result type alias for recommender operations
pub type Result<T> = std::result::Result<T, RefinerError>;
