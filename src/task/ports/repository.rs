//! Repository port for task persistence, lookup and comments.

use crate::notification::domain::NotificationDraft;
use crate::task::domain::{Task, TaskComment, TaskId, TaskSlug};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every write is atomic: the task row, its collaborator rows and the
/// notifications passed alongside either all commit or none do.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with the notifications it triggers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::DuplicateSlug`] when another task
    /// holds the slug.
    async fn store(
        &self,
        task: &Task,
        notifications: &[NotificationDraft],
    ) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task together with the notifications
    /// they trigger.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::DuplicateSlug`] when a newly assigned slug
    /// is already taken.
    async fn update(
        &self,
        task: &Task,
        notifications: &[NotificationDraft],
    ) -> TaskRepositoryResult<()>;

    /// Deletes a task along with its comments and notifications.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by internal task identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by slug.
    ///
    /// Returns `None` when no task holds the slug.
    async fn find_by_slug(&self, slug: &TaskSlug) -> TaskRepositoryResult<Option<Task>>;

    /// Returns `true` when a task holds the slug.
    async fn slug_exists(&self, slug: &TaskSlug) -> TaskRepositoryResult<bool>;

    /// Returns the tasks `user` created or is assigned to, newest first,
    /// without duplicates.
    async fn list_visible_to(&self, user: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Appends a comment to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()>;

    /// Returns the comments on a task, oldest first.
    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Another task already holds the slug.
    #[error("duplicate task slug: {0}")]
    DuplicateSlug(TaskSlug),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
