//! Backend error types.

use thiserror::Error;

/// Errors that can occur when talking to the TrackNFix backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The response body was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),
}
