//! Error types for the Strato crate

use thiserror::Error;

/// Result type for Strato operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Strato operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Raw response body
        message: String,
    },

    /// API accepted the request but reported a failure in the response envelope
    #[error("Service error: {code} - {message}")]
    Service {
        /// Error code from the response envelope
        code: i32,
        /// Error message from the response envelope
        message: String,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Please retry after {retry_after_secs} seconds")]
    RateLimit {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Response body could not be parsed into the expected shape
    #[error("failed to decode {context} response: {source}")]
    Decode {
        /// Which resource was being decoded
        context: &'static str,
        /// The underlying parse failure
        source: serde_json::Error,
    },

    /// Other errors
    #[error("{0}")]
    Other(String),
}
