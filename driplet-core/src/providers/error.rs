//! Provider error types and handling

use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can terminate a streaming session
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The server answered with a non-success status before any decoding began
    #[error("Transport error: {status}: {message}")]
    Transport { status: u16, message: String },

    /// The stream itself violated the wire contract (malformed delta payload,
    /// invalid UTF-8). Fatal: any accumulated content is discarded.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The caller's cancellation token fired
    #[error("Session cancelled")]
    Cancelled,

    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout occurred
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(30) // Default timeout value
        } else if err.is_connect() {
            ProviderError::Network(format!("Connection failed: {}", err))
        } else if let Some(status) = err.status() {
            ProviderError::Transport {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}
