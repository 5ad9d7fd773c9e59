//! Per-user dashboard aggregation over visible tasks.

use super::{Task, TaskPriority, TaskStatus};
use crate::user::domain::UserId;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// Optional narrowing applied to the created and assigned task lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    search: Option<String>,
}

impl TaskFilter {
    /// Creates an empty filter that keeps every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only tasks with the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps only tasks with the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Keeps only tasks whose title or description contains `search`,
    /// ignoring case. Blank input disables the search.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let raw = search.into();
        let trimmed = raw.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        self
    }

    /// Returns `true` when `task` passes every configured criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.search.as_deref().is_none_or(|needle| {
                task.title().as_str().to_lowercase().contains(needle)
                    || task.description().to_lowercase().contains(needle)
            })
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Tasks the user created or is assigned to.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Pending tasks that are not overdue.
    pub pending: usize,
    /// In-progress tasks that are not overdue.
    pub in_progress: usize,
    /// Incomplete tasks past their due date.
    pub overdue: usize,
    /// Tasks completed since the start of the current week.
    pub completed_this_week: usize,
    /// Share of completed tasks, rounded to one decimal place.
    pub completion_percentage: f64,
}

/// Dashboard view of a user's tasks.
///
/// All lists are ordered newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Tasks the user created, after filtering.
    pub created: Vec<Task>,
    /// Tasks assigned to the user but created by someone else, after
    /// filtering.
    pub assigned: Vec<Task>,
    /// Most recent completed tasks.
    pub completed: Vec<Task>,
    /// Most recent overdue tasks.
    pub overdue: Vec<Task>,
    /// Aggregate counts over all of the user's tasks.
    pub stats: DashboardStats,
}

impl Dashboard {
    /// Builds the dashboard for `user` from the tasks visible to them.
    ///
    /// Counts ignore `filter`; it narrows only the created and assigned
    /// lists. The completed and overdue highlight lists are capped at
    /// `highlight_limit` entries.
    #[must_use]
    pub fn build(
        user: UserId,
        mut visible: Vec<Task>,
        filter: &TaskFilter,
        today: NaiveDate,
        highlight_limit: usize,
    ) -> Self {
        visible.retain(|task| task.creator() == user || task.is_assigned(user));
        visible.sort_by(|left, right| right.created_at().cmp(&left.created_at()));

        let stats = DashboardStats::compute(&visible, today);

        let (created_all, assigned_all): (Vec<&Task>, Vec<&Task>) =
            visible.iter().partition(|task| task.creator() == user);
        let created = created_all
            .into_iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        let assigned = assigned_all
            .into_iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        let completed = visible
            .iter()
            .filter(|task| task.status() == TaskStatus::Completed)
            .take(highlight_limit)
            .cloned()
            .collect();
        let overdue = visible
            .iter()
            .filter(|task| task.is_overdue(today))
            .take(highlight_limit)
            .cloned()
            .collect();

        Self {
            created,
            assigned,
            completed,
            overdue,
            stats,
        }
    }
}

impl DashboardStats {
    /// Computes the counts over a user's deduplicated task set.
    #[must_use]
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let monday = week_start(today);
        let current = |task: &&Task| !task.is_overdue(today);

        let total = tasks.len();
        let completed = count_status(tasks, TaskStatus::Completed);
        let pending = tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Pending)
            .filter(current)
            .count();
        let in_progress = tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::InProgress)
            .filter(current)
            .count();
        let overdue = tasks.iter().filter(|task| task.is_overdue(today)).count();
        let completed_this_week = tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Completed)
            .filter(|task| {
                task.completed_at()
                    .is_some_and(|at| at.date_naive() >= monday)
            })
            .count();

        Self {
            total,
            completed,
            pending,
            in_progress,
            overdue,
            completed_this_week,
            completion_percentage: completion_percentage(completed, total),
        }
    }
}

fn count_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status() == status).count()
}

/// Returns the Monday on or before `today`.
#[must_use]
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let offset = u64::from(today.weekday().num_days_from_monday());
    today.checked_sub_days(Days::new(offset)).unwrap_or(today)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "percentage is a presentation value rounded half-to-even to one decimal place"
)]
fn completion_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percentage = completed as f64 / total as f64 * 100.0;
    (percentage * 10.0).round_ties_even() / 10.0
}
