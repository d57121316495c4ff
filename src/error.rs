//! Error types for Zanata API operations.

use thiserror::Error;

/// Errors that can occur during Zanata API operations.
#[derive(Debug, Error)]
pub enum ZanataError {
    /// Configuration is missing or incomplete.
    #[error("Zanata configuration required: {0}")]
    ConfigMissing(String),

    /// The credential key file could not be read or parsed.
    #[error("Invalid key file: {0}")]
    KeyFileError(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The server answered with well-formed JSON of an unexpected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// API request failed with a non-success status.
    #[error("Zanata API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Local I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The operation was cancelled before it completed.
    #[error("Operation was cancelled")]
    Cancelled,

    /// A background worker failed before producing a result.
    #[error("Background worker failed: {0}")]
    WorkerError(String),
}

impl ZanataError {
    /// Returns true if this error was caused by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ZanataError::Cancelled)
    }

    /// The HTTP status code, if the error came from a non-success response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ZanataError::ApiError { status_code, .. } => *status_code,
            ZanataError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Zanata operations.
pub type Result<T> = core::result::Result<T, ZanataError>;
