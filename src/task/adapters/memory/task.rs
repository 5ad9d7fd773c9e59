//! In-memory repository for task lifecycle tests and embedded use.
//!
//! Writes take the task lock and then the notification store lock, so a
//! task change and the notifications it raises become visible together.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::notification::{adapters::memory::InMemoryNotificationRepository, domain::NotificationDraft};
use crate::task::{
    domain::{Task, TaskComment, TaskId, TaskSlug},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
    notifications: InMemoryNotificationRepository,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    slug_index: HashMap<TaskSlug, TaskId>,
    comments: Vec<TaskComment>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository with its own notification store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository writing notifications into `notifications`.
    #[must_use]
    pub fn with_notifications(notifications: InMemoryNotificationRepository) -> Self {
        Self {
            state: Arc::default(),
            notifications,
        }
    }

    /// Returns the notification store shared with this repository.
    #[must_use]
    pub const fn notifications(&self) -> &InMemoryNotificationRepository {
        &self.notifications
    }

    /// Counts stored comments referencing `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn comment_count(&self, task_id: TaskId) -> TaskRepositoryResult<usize> {
        let state = self.read_state()?;
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.task_id() == task_id)
            .count())
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| lock_error(&err))
    }

    fn write_state(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| lock_error(&err))
    }

    fn append_notifications(&self, drafts: &[NotificationDraft]) -> TaskRepositoryResult<()> {
        if drafts.is_empty() {
            return Ok(());
        }
        let mut store = self
            .notifications
            .lock_store()
            .map_err(TaskRepositoryError::persistence)?;
        store
            .append(drafts)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(())
    }
}

fn lock_error(err: &impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn check_slug_free(state: &InMemoryTaskState, task: &Task) -> TaskRepositoryResult<()> {
    let Some(slug) = task.slug() else {
        return Ok(());
    };
    match state.slug_index.get(slug) {
        Some(holder) if *holder != task.id() => Err(TaskRepositoryError::DuplicateSlug(slug.clone())),
        _ => Ok(()),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(
        &self,
        task: &Task,
        notifications: &[NotificationDraft],
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        check_slug_free(&state, task)?;

        self.append_notifications(notifications)?;
        if let Some(slug) = task.slug() {
            state.slug_index.insert(slug.clone(), task.id());
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(
        &self,
        task: &Task,
        notifications: &[NotificationDraft],
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let previous_slug = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .slug()
            .cloned();
        check_slug_free(&state, task)?;

        self.append_notifications(notifications)?;
        if previous_slug.as_ref() != task.slug() {
            if let Some(old) = previous_slug {
                state.slug_index.remove(&old);
            }
            if let Some(slug) = task.slug() {
                state.slug_index.insert(slug.clone(), task.id());
            }
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&id) {
            return Err(TaskRepositoryError::NotFound(id));
        }
        let mut store = self
            .notifications
            .lock_store()
            .map_err(TaskRepositoryError::persistence)?;

        let removed = state.tasks.remove(&id);
        if let Some(slug) = removed.as_ref().and_then(Task::slug) {
            state.slug_index.remove(slug);
        }
        state.comments.retain(|comment| comment.task_id() != id);
        store.remove_for_task(id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &TaskSlug) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state
            .slug_index
            .get(slug)
            .and_then(|id| state.tasks.get(id))
            .cloned())
    }

    async fn slug_exists(&self, slug: &TaskSlug) -> TaskRepositoryResult<bool> {
        let state = self.read_state()?;
        Ok(state.slug_index.contains_key(slug))
    }

    async fn list_visible_to(&self, user: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut visible: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.creator() == user || task.is_assigned(user))
            .cloned()
            .collect();
        visible.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(visible)
    }

    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&comment.task_id()) {
            return Err(TaskRepositoryError::NotFound(comment.task_id()));
        }
        state.comments.push(comment.clone());
        Ok(())
    }

    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>> {
        let state = self.read_state()?;
        let mut comments: Vec<TaskComment> = state
            .comments
            .iter()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect();
        comments.sort_by_key(TaskComment::created_at);
        Ok(comments)
    }
}
