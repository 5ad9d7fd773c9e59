//! Diesel row models for task persistence.

use super::schema::{task_assignees, task_comments, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// URL slug.
    pub slug: Option<String>,
    /// Task title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status code.
    pub status: String,
    /// Priority code.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creating user.
    pub creator_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// URL slug.
    pub slug: Option<String>,
    /// Task title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status code.
    pub status: String,
    /// Priority code.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creating user.
    pub creator_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Mutable task columns. `None` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// URL slug.
    pub slug: Option<String>,
    /// Task title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status code.
    pub status: String,
    /// Priority code.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Task-to-collaborator link.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_assignees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssigneeRow {
    /// Task identifier.
    pub task_id: uuid::Uuid,
    /// Assigned user identifier.
    pub user_id: uuid::Uuid,
}

/// Comment record, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented task.
    pub task_id: uuid::Uuid,
    /// Author identifier.
    pub user_id: uuid::Uuid,
    /// Comment body.
    pub text: String,
    /// Posting timestamp.
    pub created_at: DateTime<Utc>,
}
