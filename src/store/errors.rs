//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A writer panicked while holding the store lock
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Seed file could not be read
    #[error("failed to read seed {path}: {message}")]
    SeedRead { path: String, message: String },

    /// Seed file is not a valid catalog
    #[error("invalid seed {path}: {message}")]
    SeedParse { path: String, message: String },

    /// A record could not be converted to JSON
    #[error("record encoding failed: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encoding(err.to_string())
    }
}
