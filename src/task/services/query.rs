//! Read-only task views: the visible list and the dashboard.

use crate::task::{
    domain::{Dashboard, Task, TaskFilter},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Maximum entries in the completed and overdue highlight lists.
    pub highlight_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { highlight_limit: 10 }
    }
}

/// Builds read-only task views for a user.
#[derive(Clone)]
pub struct TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: DashboardConfig,
}

impl<R, C> TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a query service with default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, DashboardConfig::default())
    }

    /// Creates a query service with explicit configuration.
    #[must_use]
    pub const fn with_config(repository: Arc<R>, clock: Arc<C>, config: DashboardConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Lists tasks the user created or is assigned to, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the lookup fails.
    pub async fn list_visible_tasks(&self, user: UserId) -> Result<Vec<Task>, TaskRepositoryError> {
        self.repository.list_visible_to(user).await
    }

    /// Builds the dashboard, applying `filter` to the created and assigned
    /// lists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the lookup fails.
    pub async fn dashboard(
        &self,
        user: UserId,
        filter: &TaskFilter,
    ) -> Result<Dashboard, TaskRepositoryError> {
        let visible = self.repository.list_visible_to(user).await?;
        let today = self.clock.utc().date_naive();
        Ok(Dashboard::build(
            user,
            visible,
            filter,
            today,
            self.config.highlight_limit,
        ))
    }
}
