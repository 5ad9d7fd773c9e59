//! Directory port resolving user handles.

use crate::user::domain::{UserId, UserRef, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read-only view of the external user table.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserRef>>;

    /// Resolves the given usernames, matching exactly.
    ///
    /// Usernames without a matching user are omitted from the result.
    async fn find_by_usernames(&self, usernames: &[Username])
    -> UserDirectoryResult<Vec<UserRef>>;

    /// Resolves the given identifiers. Unknown identifiers are omitted.
    async fn find_by_ids(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<UserRef>>;

    /// Returns users whose username starts with `prefix`, ignoring case,
    /// ordered by username and excluding `exclude`.
    async fn search_by_prefix(
        &self,
        prefix: &str,
        exclude: UserId,
        limit: usize,
    ) -> UserDirectoryResult<Vec<UserRef>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Persisted user data could not be reconstructed.
    #[error("invalid persisted user data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
