//! Error type system for the MTSSBJ client
//!
//! This module provides the client-side error taxonomy with:
//! - Classification of validation, authentication, transport and format failures
//! - HTTP status code mapping where a server response was received
//! - Stable error type names for logs and user-visible messages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for the MTSSBJ client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Input errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    // Backend rejected credentials or a refresh token
    #[error("Authentication failed: {0}")]
    AuthError(String),

    // Backend answered with an envelope reporting failure
    #[error("API error: {0}")]
    ApiError(String),

    // Transport errors
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponseFormat(String),

    // Local errors
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ClientError {
    /// HTTP status of the response that produced this error, if one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend answered 401 Unauthorized
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Get the error type name for logs and messages
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::ValidationError(_) => "ValidationError",
            ClientError::AuthError(_) => "AuthError",
            ClientError::ApiError(_) => "ApiError",
            ClientError::NetworkError(_) => "NetworkError",
            ClientError::ServerError { .. } => "ServerError",
            ClientError::InvalidResponseFormat(_) => "InvalidResponseFormat",
            ClientError::StorageError(_) => "StorageError",
            ClientError::ConfigError(_) => "ConfigError",
            ClientError::SerializationError(_) => "SerializationError",
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::SerializationError(err.to_string())
    }
}

/// Error summary shown by views and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorSummary {
    pub fn from_error(error: &ClientError) -> Self {
        Self {
            error: error.error_type().to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error, self.message)
    }
}

/// Result type alias for operations that can fail with ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Context extension trait for local storage failures
pub trait ErrorContext<T> {
    /// Add context to an error using a closure
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let context_str = f();
            ClientError::StorageError(format!("{}: {}", context_str, e))
        })
    }
}
