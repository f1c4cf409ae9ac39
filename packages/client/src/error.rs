//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused to seat us under this name
    #[error("Cannot join: {0}")]
    UsernameRejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}
