//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title exceeds {max} character limit ({actual} characters)")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected title.
        actual: usize,
    },

    /// The slug is not lowercase, hyphen-joined ASCII or is too long.
    #[error("invalid task slug '{0}'")]
    InvalidSlug(String),

    /// A slug has already been assigned and slugs are never regenerated.
    #[error("task {0} already has a slug")]
    SlugAlreadyAssigned(TaskId),

    /// The status value is not one of the supported values.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The priority value is not one of the supported values.
    #[error(transparent)]
    InvalidPriority(#[from] ParseTaskPriorityError),

    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyComment,
}

impl TaskDomainError {
    /// Returns the input field the error refers to.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => Some("title"),
            Self::InvalidSlug(_) | Self::SlugAlreadyAssigned(_) => Some("slug"),
            Self::InvalidStatus(_) => Some("status"),
            Self::InvalidPriority(_) => Some("priority"),
            Self::EmptyComment => Some("text"),
        }
    }
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
