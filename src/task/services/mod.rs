//! Application services for task lifecycle orchestration and dashboards.

mod error;
mod lifecycle;
mod query;
mod request;

pub use error::{ForbiddenAction, TaskErrorKind, TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::TaskLifecycleService;
pub use query::{DashboardConfig, TaskQueryService};
pub use request::{CreateTaskRequest, TaskUpdate};
