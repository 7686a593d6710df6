//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or no active session.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The current user's role does not allow the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (missing field, missing contact method).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate unique key (email, instagram handle, external payment id).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persistence backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the raw message shown to the user in a blocking alert.
    #[must_use]
    pub fn alert_message(&self) -> &str {
        match self {
            Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Storage(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
