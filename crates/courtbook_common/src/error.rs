// --- File: crates/courtbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The application-level error type for Courtbook.
///
/// Library crates keep their own error enums and convert into this one
/// by implementing `From<SpecificError> for CourtbookError`.
#[derive(Error, Debug)]
pub enum CourtbookError {
    /// The backend could not be reached (no response received)
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The backend answered with a non-success status
    #[error("{message} (status {status})")]
    ApiError { status: u16, message: String },

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The session is missing or could not be renewed
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Input rejected locally before any request was made
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The session store could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Exposes the HTTP status attached to an error, if any.
///
/// Network-level failures have no status; this is how callers tell
/// "backend unreachable" apart from "backend rejected the request".
pub trait HttpStatus {
    fn status(&self) -> Option<u16>;
}

impl HttpStatus for CourtbookError {
    fn status(&self) -> Option<u16> {
        match self {
            CourtbookError::ApiError { status, .. } => Some(*status),
            CourtbookError::AuthError(_) => Some(401),
            CourtbookError::NotFoundError(_) => Some(404),
            _ => None,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, CourtbookError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, CourtbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, CourtbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| CourtbookError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, CourtbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| CourtbookError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for CourtbookError {
    fn from(err: reqwest::Error) -> Self {
        CourtbookError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for CourtbookError {
    fn from(err: serde_json::Error) -> Self {
        CourtbookError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for CourtbookError {
    fn from(err: std::io::Error) -> Self {
        CourtbookError::InternalError(err.to_string())
    }
}

impl From<config::ConfigError> for CourtbookError {
    fn from(err: config::ConfigError) -> Self {
        CourtbookError::ConfigError(err.to_string())
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> CourtbookError {
    CourtbookError::ValidationError(message.to_string())
}
