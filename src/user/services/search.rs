//! Username autocomplete for assignee pickers.

use crate::user::{
    domain::{UserId, Username},
    ports::{UserDirectory, UserDirectoryError},
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Configuration for username search.
///
/// # Examples
///
/// ```
/// use tasktrack::user::services::UserSearchConfig;
///
/// let config = UserSearchConfig::default();
/// assert_eq!(config.limit, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserSearchConfig {
    /// Maximum number of usernames returned per query.
    pub limit: usize,
}

impl Default for UserSearchConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

/// Service-level errors for user search.
#[derive(Debug, Error)]
pub enum UserSearchError {
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Username prefix search excluding the requesting user.
#[derive(Clone)]
pub struct UserSearchService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    config: UserSearchConfig,
}

impl<D> UserSearchService<D>
where
    D: UserDirectory,
{
    /// Creates a search service with default configuration.
    #[must_use]
    pub fn new(directory: Arc<D>) -> Self {
        Self::with_config(directory, UserSearchConfig::default())
    }

    /// Creates a search service with explicit configuration.
    #[must_use]
    pub const fn with_config(directory: Arc<D>, config: UserSearchConfig) -> Self {
        Self { directory, config }
    }

    /// Returns usernames starting with `query`, ignoring case.
    ///
    /// A blank query yields no results. The requester is never included.
    ///
    /// # Errors
    ///
    /// Returns [`UserSearchError::Directory`] when the lookup fails.
    pub async fn search(
        &self,
        requester: UserId,
        query: &str,
    ) -> Result<Vec<Username>, UserSearchError> {
        let prefix = query.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        let users = self
            .directory
            .search_by_prefix(prefix, requester, self.config.limit)
            .await?;
        Ok(users
            .into_iter()
            .map(|user| user.username().clone())
            .collect())
    }
}
