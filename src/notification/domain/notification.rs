//! Notification records and drafts.

use super::NotificationDomainError;
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned, monotonically increasing notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Largest identifier representable in the `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u64 = i64::MAX.unsigned_abs();

    /// Creates a validated notification identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError::InvalidId`] when the value is zero
    /// or exceeds `i64::MAX`.
    pub const fn new(value: u64) -> Result<Self, NotificationDomainError> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(NotificationDomainError::InvalidId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification text, truncated to the storage limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationMessage(String);

impl NotificationMessage {
    /// Maximum message length in characters.
    pub const MAX_LENGTH: usize = 500;

    /// Creates a message, cutting it to [`Self::MAX_LENGTH`] characters.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError::EmptyMessage`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, NotificationDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(NotificationDomainError::EmptyMessage);
        }
        if raw.chars().count() <= Self::MAX_LENGTH {
            return Ok(Self(raw));
        }
        Ok(Self(raw.chars().take(Self::MAX_LENGTH).collect()))
    }

    /// Returns the message as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NotificationMessage {
    type Error = NotificationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NotificationMessage> for String {
    fn from(value: NotificationMessage) -> Self {
        value.0
    }
}

impl fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Notification awaiting persistence; the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDraft {
    recipient: UserId,
    message: NotificationMessage,
    task_id: Option<TaskId>,
    created_at: DateTime<Utc>,
}

impl NotificationDraft {
    /// Creates a draft stamped with the current time.
    #[must_use]
    pub fn new(
        recipient: UserId,
        message: NotificationMessage,
        task_id: Option<TaskId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            recipient,
            message,
            task_id,
            created_at: clock.utc(),
        }
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the message.
    #[must_use]
    pub const fn message(&self) -> &NotificationMessage {
        &self.message
    }

    /// Returns the linked task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Persisted notification delivered to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    message: NotificationMessage,
    is_read: bool,
    task_id: Option<TaskId>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Store-assigned identifier.
    pub id: NotificationId,
    /// Recipient.
    pub recipient: UserId,
    /// Message text.
    pub message: NotificationMessage,
    /// Read flag.
    pub is_read: bool,
    /// Linked task, if any.
    pub task_id: Option<TaskId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Materializes a stored draft under its assigned identifier.
    #[must_use]
    pub fn from_draft(id: NotificationId, draft: NotificationDraft) -> Self {
        Self {
            id,
            recipient: draft.recipient,
            message: draft.message,
            is_read: false,
            task_id: draft.task_id,
            created_at: draft.created_at,
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            recipient: data.recipient,
            message: data.message,
            is_read: data.is_read,
            task_id: data.task_id,
            created_at: data.created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the message.
    #[must_use]
    pub const fn message(&self) -> &NotificationMessage {
        &self.message
    }

    /// Returns `true` once the recipient has seen the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns the linked task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flags the notification as read.
    pub const fn mark_read(&mut self) {
        self.is_read = true;
    }
}
