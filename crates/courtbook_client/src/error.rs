// --- File: crates/courtbook_client/src/error.rs ---
use courtbook_common::{CourtbookError, HttpStatus};
use serde_json::Value;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`ApiClient`](crate::ApiClient) and everything built on it.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    ///
    /// `message` prefers the body's `detail`, then its `message`, then
    /// falls back to `"HTTP Error: <status>"`.
    #[error("{message}")]
    Http {
        message: String,
        status: u16,
        body: Option<Value>,
    },

    /// The backend rejected the credentials and they could not be renewed.
    /// The session has already been cleared when this is returned.
    #[error("Session expired: {message}")]
    SessionExpired { message: String, body: Option<Value> },

    /// No response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Input rejected locally; no request was sent.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// A payload could not be encoded or a success body did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The client was built with an invalid configuration.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Builds the normalized error for a non-success response.
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| truthy_text(b.get("detail")).or_else(|| truthy_text(b.get("message"))))
            .unwrap_or_else(|| format!("HTTP Error: {}", status));
        ApiError::Http {
            message,
            status,
            body,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Parsed response body, when the failure came from the backend.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Http { body, .. } | ApiError::SessionExpired { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } | ApiError::SessionExpired { message, .. } => {
                message.clone()
            }
            ApiError::Validation(message) | ApiError::Configuration(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::SessionExpired { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl HttpStatus for ApiError {
    fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::SessionExpired { .. } => Some(401),
            _ => None,
        }
    }
}

/// Text of a JSON field if it is "truthy": non-empty strings as-is, other
/// non-null, non-false, non-zero values rendered as JSON.
fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Convert ApiError to CourtbookError
impl From<ApiError> for CourtbookError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http {
                status: 404,
                message,
                ..
            } => CourtbookError::NotFoundError(message),
            ApiError::Http {
                status, message, ..
            } => CourtbookError::ApiError { status, message },
            ApiError::SessionExpired { message, .. } => CourtbookError::AuthError(message),
            ApiError::Network(e) => CourtbookError::HttpError(e.to_string()),
            ApiError::Validation(msg) => CourtbookError::ValidationError(msg),
            ApiError::Serialization(e) => CourtbookError::ParseError(e.to_string()),
            ApiError::Storage(e) => CourtbookError::StorageError(e.to_string()),
            ApiError::Configuration(msg) => CourtbookError::ConfigError(msg),
        }
    }
}
