//! Access policy for shared tasks.
//!
//! Rights follow from membership alone: the creator owns the task and may do
//! anything with it, collaborators may view it, change its status and
//! comment, and everyone else is treated as if the task did not exist.
//! Services resolve a [`TaskCapability`] once per request and branch on it.

use super::Task;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};

/// What a user may do with a particular task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCapability {
    /// The creator: full edit, delete and assignment rights.
    Owner,
    /// An assigned user: view, status updates and comments.
    Collaborator,
    /// No relationship to the task.
    None,
}

impl TaskCapability {
    /// Resolves the capability of `user` on `task`.
    #[must_use]
    pub fn resolve(user: UserId, task: &Task) -> Self {
        if task.creator() == user {
            Self::Owner
        } else if task.is_assigned(user) {
            Self::Collaborator
        } else {
            Self::None
        }
    }

    /// Returns `true` when the task may be viewed and commented on.
    #[must_use]
    pub const fn can_view(self) -> bool {
        matches!(self, Self::Owner | Self::Collaborator)
    }

    /// Returns `true` when every field, the collaborator set and the task's
    /// existence may be changed.
    #[must_use]
    pub const fn can_edit(self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Returns `true` when the status may be changed.
    #[must_use]
    pub const fn can_update_status(self) -> bool {
        matches!(self, Self::Owner | Self::Collaborator)
    }
}

/// Returns `true` when `user` created or is assigned to `task`.
#[must_use]
pub fn can_view(user: UserId, task: &Task) -> bool {
    TaskCapability::resolve(user, task).can_view()
}

/// Returns `true` when `user` created `task`.
#[must_use]
pub fn can_edit(user: UserId, task: &Task) -> bool {
    TaskCapability::resolve(user, task).can_edit()
}

/// Returns `true` when `user` created or is assigned to `task`.
#[must_use]
pub fn can_update_status(user: UserId, task: &Task) -> bool {
    TaskCapability::resolve(user, task).can_update_status()
}
