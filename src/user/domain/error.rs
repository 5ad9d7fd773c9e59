//! Error types for user identity validation.

use thiserror::Error;

/// Errors returned while constructing user identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the 150-character storage limit.
    #[error("username exceeds 150 character limit: {0}")]
    UsernameTooLong(String),

    /// The username contains whitespace or a list separator.
    #[error("username '{0}' contains invalid characters")]
    InvalidUsername(String),
}
