//! Diesel row models for notification persistence.

use super::schema::notifications;
use crate::notification::domain::NotificationDraft;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for notification records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Sequence identifier.
    pub id: i64,
    /// Recipient identifier.
    pub user_id: uuid::Uuid,
    /// Message text.
    pub message: String,
    /// Read flag.
    pub is_read: bool,
    /// Linked task identifier.
    pub task_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for notification records; the identifier comes from the
/// sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    /// Recipient identifier.
    pub user_id: uuid::Uuid,
    /// Message text.
    pub message: String,
    /// Read flag.
    pub is_read: bool,
    /// Linked task identifier.
    pub task_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&NotificationDraft> for NewNotificationRow {
    fn from(draft: &NotificationDraft) -> Self {
        Self {
            user_id: draft.recipient().into_inner(),
            message: draft.message().as_str().to_owned(),
            is_read: false,
            task_id: draft.task_id().map(crate::task::domain::TaskId::into_inner),
            created_at: draft.created_at(),
        }
    }
}
