//! Read-side notification service: counts, polling, and the inbox page.

use super::NotificationConfig;
use crate::notification::{
    domain::{Notification, NotificationId, humanize_elapsed},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Poll result entry with a humanized age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentNotification {
    /// Notification identifier, usable as the next `since` cursor.
    pub id: NotificationId,
    /// Message text.
    pub message: String,
    /// Age such as `5 minutes ago`.
    pub time: String,
    /// Read flag.
    pub is_read: bool,
    /// Linked task, if any.
    pub task_id: Option<TaskId>,
}

/// Service-level errors for notification reads.
#[derive(Debug, Error)]
pub enum NotificationServiceError {
    /// The notification does not exist or belongs to another user.
    #[error("notification {0} not found")]
    NotFound(NotificationId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
}

/// Result type for notification service operations.
pub type NotificationServiceResult<T> = Result<T, NotificationServiceError>;

/// Notification inbox operations for one recipient at a time.
#[derive(Clone)]
pub struct NotificationService<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<N>,
    clock: Arc<C>,
    config: NotificationConfig,
}

impl<N, C> NotificationService<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with default configuration.
    #[must_use]
    pub fn new(repository: Arc<N>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, NotificationConfig::default())
    }

    /// Creates a service with explicit configuration.
    #[must_use]
    pub const fn with_config(repository: Arc<N>, clock: Arc<C>, config: NotificationConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Counts unread notifications.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when the count fails.
    pub async fn unread_count(&self, user: UserId) -> NotificationServiceResult<usize> {
        Ok(self.repository.unread_count(user).await?)
    }

    /// Returns notifications newer than `since`, newest first, with their
    /// age rendered relative to the clock.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when the lookup fails.
    pub async fn recent(
        &self,
        user: UserId,
        since: Option<NotificationId>,
    ) -> NotificationServiceResult<Vec<RecentNotification>> {
        let now = self.clock.utc();
        let notifications = self
            .repository
            .list_for_user(user, since, self.config.recent_limit)
            .await?;
        Ok(notifications
            .into_iter()
            .map(|notification| RecentNotification {
                id: notification.id(),
                message: notification.message().to_string(),
                time: format!("{} ago", humanize_elapsed(notification.created_at(), now)),
                is_read: notification.is_read(),
                task_id: notification.task_id(),
            })
            .collect())
    }

    /// Loads the inbox page and then marks everything read.
    ///
    /// The returned notifications carry the read flags they had before the
    /// page was opened, so callers can highlight what is new.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when either step
    /// fails.
    pub async fn open_inbox(&self, user: UserId) -> NotificationServiceResult<Vec<Notification>> {
        let notifications = self
            .repository
            .list_for_user(user, None, self.config.inbox_limit)
            .await?;
        let marked = self.repository.mark_all_read(user).await?;
        tracing::debug!(user = %user, marked, "marked notifications read");
        Ok(notifications)
    }

    /// Marks all of `user`'s notifications as read and returns how many
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when the update fails.
    pub async fn mark_all_read(&self, user: UserId) -> NotificationServiceResult<usize> {
        Ok(self.repository.mark_all_read(user).await?)
    }

    /// Marks a single notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::NotFound`] when the notification
    /// does not exist or belongs to someone else.
    pub async fn mark_read(&self, user: UserId, id: NotificationId) -> NotificationServiceResult<()> {
        if self.repository.mark_read(user, id).await? {
            Ok(())
        } else {
            Err(NotificationServiceError::NotFound(id))
        }
    }
}
