//! Repository port for profiles.

use crate::profile::domain::Profile;
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds the profile of `user`.
    async fn find(&self, user: UserId) -> ProfileRepositoryResult<Option<Profile>>;

    /// Inserts a new profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateProfile`] when the user
    /// already has one.
    async fn insert(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Saves changes to an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the user has none.
    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// The user already has a profile.
    #[error("profile already exists for user {0}")]
    DuplicateProfile(UserId),

    /// The user has no profile.
    #[error("no profile for user {0}")]
    NotFound(UserId),

    /// Persisted profile data could not be reconstructed.
    #[error("invalid persisted profile data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
