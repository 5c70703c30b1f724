//! Client error types

use shared::ErrorCode;
use std::time::Duration;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Remote evaluation failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No answer within the bounded wait
    #[error("Remote evaluation timed out after {0:?}")]
    Timeout(Duration),
}

impl ClientError {
    /// Map to the unified error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Http(_) | ClientError::Status { .. } => ErrorCode::RemoteUnavailable,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::RemoteMalformed
            }
            ClientError::Timeout(_) => ErrorCode::RemoteTimeout,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
