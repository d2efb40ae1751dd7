//! Error types for the patro ecosystem.

use thiserror::Error;

/// Errors that can occur in patro operations.
#[derive(Error, Debug)]
pub enum PatroError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid year range: {start} is after {end}")]
    InvalidYearRange { start: u16, end: u16 },
}

impl PatroError {
    /// Whether the error came from fetching or parsing a month, and so is
    /// worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PatroError::Network(_) | PatroError::Http(_) | PatroError::Parse(_)
        )
    }
}

impl From<reqwest::Error> for PatroError {
    fn from(err: reqwest::Error) -> Self {
        PatroError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PatroError {
    fn from(err: serde_json::Error) -> Self {
        PatroError::Serialization(err.to_string())
    }
}

/// Result type alias for patro operations.
pub type PatroResult<T> = Result<T, PatroError>;
