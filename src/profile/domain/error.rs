//! Error types for profile validation.

use thiserror::Error;

/// Errors returned while constructing profile values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The uploaded file name is empty or contains path components.
    #[error("invalid avatar file name: {0:?}")]
    InvalidAvatarFilename(String),

    /// The resulting storage path exceeds the column width.
    #[error("avatar path exceeds {max} characters")]
    AvatarPathTooLong {
        /// Maximum allowed length.
        max: usize,
    },
}
