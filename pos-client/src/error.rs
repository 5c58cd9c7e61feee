//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token missing, expired or rejected; `message` is the backend's text when it sent one
    #[error("Authentication required: {}", message.as_deref().unwrap_or("no details"))]
    Unauthorized { message: Option<String> },

    /// Non-success status; `message` is the backend's error text when it sent one
    #[error("Request rejected ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message supplied by the backend, to be shown to the operator verbatim
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message, .. } | ClientError::Unauthorized { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            ClientError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
