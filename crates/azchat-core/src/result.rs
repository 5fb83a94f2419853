//! Result type aliases for AzChat.

use crate::AzchatError;

/// A specialized `Result` type for AzChat operations.
pub type AzchatResult<T> = Result<T, AzchatError>;
