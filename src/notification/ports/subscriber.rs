//! Observer port for pushing committed notifications to live channels.

use crate::notification::domain::NotificationDraft;
use std::sync::Arc;
use thiserror::Error;

/// Receives notifications after they have been committed.
///
/// Delivery is best effort. Failures are logged by the dispatcher and never
/// roll back the task change that produced the notification.
pub trait NotificationSubscriber: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSubscriberError`] when the channel rejects the
    /// message.
    fn deliver(&self, notification: &NotificationDraft) -> Result<(), NotificationSubscriberError>;
}

/// Failure reported by a notification subscriber.
#[derive(Debug, Clone, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotificationSubscriberError(Arc<dyn std::error::Error + Send + Sync>);

impl NotificationSubscriberError {
    /// Wraps a delivery error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
