//! Client error types

use booking_engine::booking::{SourceError, StoreError};
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row clashes with existing data
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Bad client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    fn is_bad_data(&self) -> bool {
        matches!(self, Self::InvalidResponse(_) | Self::Serialization(_))
            || matches!(self, Self::Http(e) if e.is_decode())
    }
}

impl From<ClientError> for SourceError {
    fn from(err: ClientError) -> Self {
        if err.is_bad_data() {
            return SourceError::Malformed(err.to_string());
        }
        match err {
            ClientError::NotFound(msg) => SourceError::VehicleNotFound(msg),
            other => SourceError::Unavailable(other.to_string()),
        }
    }
}

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Conflict(msg) => StoreError::Conflict(msg),
            ClientError::Api { status, message } if (400..500).contains(&status) => {
                StoreError::Rejected(message)
            }
            ClientError::Unauthorized(msg) | ClientError::Forbidden(msg) => {
                StoreError::Rejected(msg)
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Conflict(_) => ErrorCode::AlreadyExists,
            ClientError::Config(_) => ErrorCode::ConfigError,
            _ => ErrorCode::UpstreamError,
        };
        let app = AppError::with_message(code, err.to_string());
        match err {
            ClientError::Api { status, .. } => app.with_detail("status", status),
            _ => app,
        }
    }
}
