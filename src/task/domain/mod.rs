//! Domain model for shared tasks.
//!
//! Covers the task aggregate and its status bookkeeping, slug derivation,
//! the owner/collaborator access policy, comments and the dashboard
//! aggregation. Everything here is pure: time is read through an injected
//! [`mockable::Clock`] and persistence lives behind the ports.

mod access;
mod comment;
mod dashboard;
mod error;
mod ids;
mod slug;
mod task;

pub use access::{TaskCapability, can_edit, can_update_status, can_view};
pub use comment::{CommentId, CommentText, PersistedCommentData, TaskComment};
pub use dashboard::{Dashboard, DashboardStats, TaskFilter, week_start};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskLookup, TaskTitle};
pub use slug::{SlugCandidates, TaskSlug, slugify};
pub use task::{AppliedChanges, NewTask, PersistedTaskData, Task, TaskChanges, TaskPriority, TaskStatus};
