//! Unified error types for the user store.

use std::fmt::Debug;
use thiserror::Error;

/// Error taxonomy for every layer of the user store.
///
/// Driver failures are classified at the data-access boundary so callers can
/// branch on the kind of failure instead of inspecting message text. The
/// driver's message is always kept in the variant payload.
#[derive(Error, Debug)]
pub enum AzchatError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Invalid input, rejected locally or by the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Constraint violation (unique, foreign key, not-null, check)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// The store could not be reached or the connection failed mid-call
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AzchatError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Connectivity(_) => "CONNECTIVITY_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a connectivity error.
    #[must_use]
    pub fn connectivity<T: Into<String>>(message: T) -> Self {
        Self::Connectivity(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is worth retrying.
    ///
    /// Only connectivity failures qualify; nothing in this crate retries on
    /// its own.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }

    /// Returns true for the not-found kind.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AzchatError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                use sqlx::error::ErrorKind;

                match db_err.kind() {
                    ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => {
                        return Self::Conflict(db_err.message().to_string());
                    }
                    _ => {}
                }

                // SQLSTATE class 22 is "data exception", class 08 "connection exception"
                match db_err.code().as_deref() {
                    Some(code) if code.starts_with("22") => {
                        Self::Validation(db_err.message().to_string())
                    }
                    Some(code) if code.starts_with("08") => {
                        Self::Connectivity(db_err.message().to_string())
                    }
                    _ => Self::Database(err.to_string()),
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connectivity(err.to_string()),
            sqlx::Error::Configuration(_) => Self::Configuration(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}
