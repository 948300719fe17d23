//! # Store Errors

use thiserror::Error;

/// Result type for row store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Row store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Connection(String),

    #[error("Store query failed ({status}): {message}")]
    Query { status: u16, message: String },

    #[error("Store returned an unreadable response: {0}")]
    Decode(String),
}
