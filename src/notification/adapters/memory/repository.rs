//! In-memory notification repository for tests and embedded use.
//!
//! The backing [`NotificationStore`] is shared with the in-memory task
//! repository so that task writes and their notifications land under one
//! pair of locks.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::notification::{
    domain::{Notification, NotificationDomainError, NotificationDraft, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;

/// Notification rows plus the identifier sequence.
#[derive(Debug, Default)]
pub(crate) struct NotificationStore {
    last_id: u64,
    rows: BTreeMap<NotificationId, Notification>,
}

impl NotificationStore {
    /// Reserves identifiers for every draft before inserting any of them.
    pub(crate) fn append(
        &mut self,
        drafts: &[NotificationDraft],
    ) -> Result<Vec<NotificationId>, NotificationDomainError> {
        let mut ids = Vec::with_capacity(drafts.len());
        let mut next = self.last_id;
        for _ in drafts {
            next = next.saturating_add(1);
            ids.push(NotificationId::new(next)?);
        }
        for (id, draft) in ids.iter().zip(drafts) {
            self.rows.insert(*id, Notification::from_draft(*id, draft.clone()));
        }
        self.last_id = next;
        Ok(ids)
    }

    /// Drops every notification linked to `task_id`.
    pub(crate) fn remove_for_task(&mut self, task_id: TaskId) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|_, notification| notification.task_id() != Some(task_id));
        before.saturating_sub(self.rows.len())
    }

    pub(crate) fn count_for_task(&self, task_id: TaskId) -> usize {
        self.rows
            .values()
            .filter(|notification| notification.task_id() == Some(task_id))
            .count()
    }
}

/// Thread-safe in-memory notification repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<NotificationStore>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts notifications linked to `task_id` across all recipients.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn count_for_task(&self, task_id: TaskId) -> NotificationRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.count_for_task(task_id))
    }

    pub(crate) fn lock_store(
        &self,
    ) -> Result<RwLockWriteGuard<'_, NotificationStore>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write_store(&self) -> NotificationRepositoryResult<RwLockWriteGuard<'_, NotificationStore>> {
        self.lock_store().map_err(NotificationRepositoryError::persistence)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn unread_count(&self, user: UserId) -> NotificationRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .rows
            .values()
            .filter(|notification| notification.recipient() == user && !notification.is_read())
            .count())
    }

    async fn list_for_user(
        &self,
        user: UserId,
        after: Option<NotificationId>,
        limit: usize,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matches: Vec<Notification> = state
            .rows
            .values()
            .filter(|notification| notification.recipient() == user)
            .filter(|notification| after.is_none_or(|since| notification.id() > since))
            .cloned()
            .collect();
        matches.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        matches.truncate(limit);
        Ok(matches)
    }

    async fn mark_all_read(&self, user: UserId) -> NotificationRepositoryResult<usize> {
        let mut state = self.write_store()?;
        let mut changed = 0_usize;
        for notification in state
            .rows
            .values_mut()
            .filter(|notification| notification.recipient() == user && !notification.is_read())
        {
            notification.mark_read();
            changed = changed.saturating_add(1);
        }
        Ok(changed)
    }

    async fn mark_read(
        &self,
        user: UserId,
        id: NotificationId,
    ) -> NotificationRepositoryResult<bool> {
        let mut state = self.write_store()?;
        match state.rows.get_mut(&id) {
            Some(notification) if notification.recipient() == user => {
                notification.mark_read();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
