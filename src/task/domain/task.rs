//! Task aggregate root and related task lifecycle types.

use super::{
    ParseTaskPriorityError, ParseTaskStatusError, TaskCapability, TaskDomainError, TaskId,
    TaskSlug, TaskTitle,
};
use crate::user::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Task progress status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// `completed_at` is set exactly when the status is
/// [`TaskStatus::Completed`]; every status mutation goes through
/// [`Task::update_status`] to keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    slug: Option<TaskSlug>,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    creator: UserId,
    assignees: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// User creating the task.
    pub creator: UserId,
    /// Initial collaborators.
    pub assignees: BTreeSet<UserId>,
}

impl NewTask {
    /// Creates a pending, medium-priority task draft with no collaborators.
    #[must_use]
    pub const fn new(title: TaskTitle, creator: UserId) -> Self {
        Self {
            title,
            description: String::new(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
            creator,
            assignees: BTreeSet::new(),
        }
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted slug; absent for rows written before slugs existed.
    pub slug: Option<TaskSlug>,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted creator.
    pub creator: UserId,
    /// Persisted collaborators.
    pub assignees: BTreeSet<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Validated owner edit. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<TaskTitle>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement collaborator set.
    pub assignees: Option<BTreeSet<UserId>>,
}

/// Outcome of applying a change set, used to drive notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedChanges {
    /// Status before the change when it actually changed.
    pub previous_status: Option<TaskStatus>,
    /// Collaborators that were not assigned before.
    pub added_assignees: Vec<UserId>,
    /// Collaborators that are no longer assigned.
    pub removed_assignees: Vec<UserId>,
}

impl AppliedChanges {
    /// Returns `true` when the status value changed.
    #[must_use]
    pub const fn status_changed(&self) -> bool {
        self.previous_status.is_some()
    }
}

impl Task {
    /// Creates a new task without a slug.
    ///
    /// The slug is assigned by the lifecycle service once a unique candidate
    /// has been found.
    #[must_use]
    pub fn new(new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewTask {
            title,
            description,
            status,
            priority,
            due_date,
            creator,
            assignees,
        } = new_task;

        Self {
            id: TaskId::new(),
            slug: None,
            title,
            description,
            status,
            priority,
            due_date,
            creator,
            assignees,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: (status == TaskStatus::Completed).then_some(timestamp),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            slug: data.slug,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            creator: data.creator,
            assignees: data.assignees,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the slug, if one has been assigned.
    #[must_use]
    pub const fn slug(&self) -> Option<&TaskSlug> {
        self.slug.as_ref()
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// Returns the collaborators.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<UserId> {
        &self.assignees
    }

    /// Returns `true` when `user` is a collaborator.
    #[must_use]
    pub fn is_assigned(&self, user: UserId) -> bool {
        self.assignees.contains(&user)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns what `user` may do with this task.
    #[must_use]
    pub fn capability_of(&self, user: UserId) -> TaskCapability {
        TaskCapability::resolve(user, self)
    }

    /// Returns `true` when the due date lies strictly before `today` and the
    /// task is not completed. Tasks without a due date are never overdue.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < today)
    }

    /// Returns the users told about a status change: the creator first, then
    /// every collaborator other than the creator.
    #[must_use]
    pub fn status_watchers(&self) -> Vec<UserId> {
        std::iter::once(self.creator)
            .chain(
                self.assignees
                    .iter()
                    .copied()
                    .filter(|user| *user != self.creator),
            )
            .collect()
    }

    /// Assigns the slug of a task that has none.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SlugAlreadyAssigned`] if a slug is
    /// already set; slugs are never regenerated.
    pub fn assign_slug(&mut self, slug: TaskSlug) -> Result<(), TaskDomainError> {
        if self.slug.is_some() {
            return Err(TaskDomainError::SlugAlreadyAssigned(self.id));
        }
        self.slug = Some(slug);
        Ok(())
    }

    /// Sets the status and keeps `completed_at` in step.
    ///
    /// Returns the previous status when the value changed.
    pub fn update_status(&mut self, status: TaskStatus, clock: &impl Clock) -> Option<TaskStatus> {
        let previous = self.status;
        self.status = status;
        self.sync_completed_at(clock);
        self.touch(clock);
        (previous != status).then_some(previous)
    }

    /// Applies an owner edit.
    ///
    /// Fields left as `None` keep their value. The modification timestamp is
    /// refreshed even when nothing changed.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &impl Clock) -> AppliedChanges {
        let TaskChanges {
            title,
            description,
            status,
            priority,
            due_date,
            assignees,
        } = changes;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }

        let mut applied = AppliedChanges::default();
        if let Some(new_assignees) = assignees {
            applied.added_assignees = new_assignees
                .difference(&self.assignees)
                .copied()
                .collect();
            applied.removed_assignees = self
                .assignees
                .difference(&new_assignees)
                .copied()
                .collect();
            self.assignees = new_assignees;
        }

        match status {
            Some(new_status) => applied.previous_status = self.update_status(new_status, clock),
            None => self.touch(clock),
        }
        applied
    }

    fn sync_completed_at(&mut self, clock: &impl Clock) {
        if self.status == TaskStatus::Completed {
            if self.completed_at.is_none() {
                self.completed_at = Some(clock.utc());
            }
        } else {
            self.completed_at = None;
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
