//! Repository port for reading and acknowledging notifications.
//!
//! Notifications are written by the task repository together with the task
//! change that caused them, so this port only exposes reads and read-flag
//! updates.

use crate::notification::domain::{Notification, NotificationId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification persistence contract.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Counts unread notifications for `user`.
    async fn unread_count(&self, user: UserId) -> NotificationRepositoryResult<usize>;

    /// Lists notifications for `user`, newest first.
    ///
    /// When `after` is given only notifications with a larger identifier are
    /// returned. At most `limit` rows are returned.
    async fn list_for_user(
        &self,
        user: UserId,
        after: Option<NotificationId>,
        limit: usize,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Marks every unread notification of `user` as read and returns how
    /// many changed.
    async fn mark_all_read(&self, user: UserId) -> NotificationRepositoryResult<usize>;

    /// Marks one notification as read.
    ///
    /// Returns `false` when no notification with `id` belongs to `user`.
    async fn mark_read(
        &self,
        user: UserId,
        id: NotificationId,
    ) -> NotificationRepositoryResult<bool>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// Persisted notification data could not be reconstructed.
    #[error("invalid persisted notification data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
