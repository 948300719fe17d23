//! # CLI Errors

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to start server: {0}")]
    Boot(String),

    #[error("Failed to render output: {0}")]
    Render(String),
}

impl CliError {
    pub fn boot_failed(message: impl Into<String>) -> Self {
        CliError::Boot(message.into())
    }
}
