//! Error types for notification domain validation.

use thiserror::Error;

/// Errors returned while constructing notification values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationDomainError {
    /// The message is empty after trimming.
    #[error("notification message must not be empty")]
    EmptyMessage,

    /// The identifier is outside the range the store can hold.
    #[error("invalid notification identifier {0}")]
    InvalidId(u64),
}
