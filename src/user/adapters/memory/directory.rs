//! In-memory user directory for tests and embedded use.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{UserId, UserRef, Username},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<BTreeMap<UserId, UserRef>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Persistence`] when the lock is poisoned.
    pub fn insert(&self, user: UserRef) -> UserDirectoryResult<()> {
        let mut users = self.users.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        users.insert(user.id(), user);
        Ok(())
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&BTreeMap<UserId, UserRef>) -> T,
    ) -> UserDirectoryResult<T> {
        let users = self.users.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(f(&users))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserRef>> {
        self.read(|users| users.get(&id).cloned())
    }

    async fn find_by_usernames(
        &self,
        usernames: &[Username],
    ) -> UserDirectoryResult<Vec<UserRef>> {
        self.read(|users| {
            users
                .values()
                .filter(|user| usernames.contains(user.username()))
                .cloned()
                .collect()
        })
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<UserRef>> {
        self.read(|users| ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn search_by_prefix(
        &self,
        prefix: &str,
        exclude: UserId,
        limit: usize,
    ) -> UserDirectoryResult<Vec<UserRef>> {
        self.read(|users| {
            let mut matches: Vec<UserRef> = users
                .values()
                .filter(|user| user.id() != exclude)
                .filter(|user| user.username().starts_with_ignore_case(prefix))
                .cloned()
                .collect();
            matches.sort_by(|left, right| left.username().cmp(right.username()));
            matches.truncate(limit);
            matches
        })
    }
}
