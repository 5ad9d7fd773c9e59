//! Errors raised by the task services.

use crate::task::{domain::TaskDomainError, ports::TaskRepositoryError};
use crate::user::ports::UserDirectoryError;
use std::fmt;
use thiserror::Error;

/// Action a user attempted without the required capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForbiddenAction {
    /// A collaborator tried to change fields other than the status.
    EditFields(Vec<&'static str>),
    /// A collaborator tried to delete the task.
    Delete,
}

impl fmt::Display for ForbiddenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EditFields(fields) => {
                write!(f, "only the status may be changed, not {}", fields.join(", "))
            }
            Self::Delete => f.write_str("only the creator may delete this task"),
        }
    }
}

/// Caller-facing classification of a lifecycle failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// Input was malformed or incomplete; nothing was changed.
    Validation,
    /// The user lacks the capability for the action; nothing was changed.
    Forbidden,
    /// The task does not exist or is not visible to the user.
    NotFound,
    /// Storage or lookup failure outside the business rules.
    Internal,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Some assignee usernames do not match any user.
    #[error("unknown usernames: {}", .0.join(", "))]
    UnknownUsers(Vec<String>),

    /// A full update omitted required fields.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A collaborator update carried no status.
    #[error("a status value is required")]
    StatusRequired,

    /// The user may see the task but not perform the action.
    #[error("forbidden: {0}")]
    Forbidden(ForbiddenAction),

    /// The task does not exist or is hidden from the user.
    #[error("task not found: {0}")]
    NotFound(String),

    /// Every slug candidate for the title was taken.
    #[error("no free slug for title {0:?}")]
    SlugExhausted(String),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// User directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl TaskLifecycleError {
    /// Classifies the error for the caller.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Domain(_) | Self::UnknownUsers(_) | Self::MissingFields(_) | Self::StatusRequired => {
                TaskErrorKind::Validation
            }
            Self::Forbidden(_) => TaskErrorKind::Forbidden,
            Self::NotFound(_) => TaskErrorKind::NotFound,
            Self::SlugExhausted(_) | Self::Repository(_) | Self::Directory(_) => {
                TaskErrorKind::Internal
            }
        }
    }

    /// Names the input field the error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Domain(err) => err.field(),
            Self::UnknownUsers(_) => Some("assigned_users"),
            Self::MissingFields(fields) => fields.first().copied(),
            Self::StatusRequired => Some("status"),
            Self::Forbidden(ForbiddenAction::EditFields(fields)) => fields.first().copied(),
            Self::Forbidden(ForbiddenAction::Delete)
            | Self::NotFound(_)
            | Self::SlugExhausted(_)
            | Self::Repository(_)
            | Self::Directory(_) => None,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;
