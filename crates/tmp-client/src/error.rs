//! Account lookup errors.

use thiserror::Error;

/// Provider-level failure, distinct from a user simply not existing.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fixture file error: {0}")]
    Fixtures(#[from] std::io::Error),
}

impl LookupError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            LookupError::Http(_) | LookupError::RateLimit => true,
            LookupError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
