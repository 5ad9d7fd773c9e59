//! Raw inputs accepted by the lifecycle service.
//!
//! Values arrive as the web layer received them; parsing and validation
//! happen inside the service so that every failure maps onto one error type.

use crate::user::domain::parse_username_list;
use chrono::NaiveDate;

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) status: Option<String>,
    pub(super) priority: Option<String>,
    pub(super) due_date: Option<NaiveDate>,
    pub(super) assigned_usernames: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with a title; everything else takes its default.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status code, such as `in_progress`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the priority code, such as `high`.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the collaborators by username.
    #[must_use]
    pub fn with_assignees<I, S>(mut self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assigned_usernames = usernames.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the collaborators from a comma-separated username list.
    #[must_use]
    pub fn with_assignee_list(self, raw: &str) -> Self {
        self.with_assignees(parse_username_list(raw))
    }
}

/// Field changes requested for an existing task. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) status: Option<String>,
    pub(super) priority: Option<String>,
    pub(super) due_date: Option<Option<NaiveDate>>,
    pub(super) assigned_usernames: Option<Vec<String>>,
}

impl TaskUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new status code.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets a new priority code.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the collaborators by username.
    #[must_use]
    pub fn with_assignees<I, S>(mut self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assigned_usernames = Some(usernames.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the collaborators from a comma-separated username list.
    #[must_use]
    pub fn with_assignee_list(self, raw: &str) -> Self {
        self.with_assignees(parse_username_list(raw))
    }

    /// Names of the fields present, in declaration order.
    pub(super) fn present_fields(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("status", self.status.is_some()),
            ("priority", self.priority.is_some()),
            ("due_date", self.due_date.is_some()),
            ("assigned_users", self.assigned_usernames.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Required fields a full update left out.
    pub(super) fn missing_for_replace(&self) -> Vec<&'static str> {
        let present = self.present_fields();
        REPLACE_REQUIRED
            .into_iter()
            .filter(|field| !present.contains(field))
            .collect()
    }
}

/// Fields a full update must carry. `due_date` and `assigned_users` are
/// nullable, so omitting them clears them.
const REPLACE_REQUIRED: [&str; 4] = ["title", "description", "status", "priority"];
