//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Chat error: {0}")]
    Chat(#[from] chat_client::ChatError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] tmp_client::LookupError),

    #[error("Invalid command pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
