//! Explicit get-or-create and avatar management.

use crate::profile::{
    domain::{AvatarPath, Profile, ProfileDomainError},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// Avatar input failed validation.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

/// Profile orchestration service.
#[derive(Clone)]
pub struct ProfileService<P, C>
where
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> ProfileService<P, C>
where
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a profile service.
    #[must_use]
    pub const fn new(repository: Arc<P>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the profile of `user`, creating an empty one if absent.
    ///
    /// Concurrent first calls for the same user converge on one stored
    /// profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when persistence fails.
    pub async fn get_or_create(&self, user: UserId) -> Result<Profile, ProfileServiceError> {
        if let Some(existing) = self.repository.find(user).await? {
            return Ok(existing);
        }

        let profile = Profile::new(user, &*self.clock);
        match self.repository.insert(&profile).await {
            Ok(()) => {
                info!(user_id = %user, "created profile");
                Ok(profile)
            }
            Err(ProfileRepositoryError::DuplicateProfile(_)) => {
                debug!(user_id = %user, "profile created concurrently, reloading");
                self.repository
                    .find(user)
                    .await?
                    .ok_or_else(|| ProfileRepositoryError::NotFound(user).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Records an uploaded avatar for `user` and returns the updated
    /// profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Domain`] when `filename` cannot form a
    /// storage path, or [`ProfileServiceError::Repository`] when persistence
    /// fails.
    pub async fn set_avatar(
        &self,
        user: UserId,
        filename: &str,
    ) -> Result<Profile, ProfileServiceError> {
        let avatar = AvatarPath::for_upload(user, filename)?;
        let mut profile = self.get_or_create(user).await?;
        profile.replace_avatar(Some(avatar), &*self.clock);
        self.repository.update(&profile).await?;
        info!(user_id = %user, avatar = %filename.trim(), "avatar updated");
        Ok(profile)
    }

    /// Removes the avatar of `user` and returns the path that was cleared,
    /// so the caller can delete the file.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when persistence fails.
    pub async fn clear_avatar(
        &self,
        user: UserId,
    ) -> Result<Option<AvatarPath>, ProfileServiceError> {
        let mut profile = self.get_or_create(user).await?;
        if profile.avatar().is_none() {
            return Ok(None);
        }
        let previous = profile.replace_avatar(None, &*self.clock);
        self.repository.update(&profile).await?;
        info!(user_id = %user, "avatar cleared");
        Ok(previous)
    }
}
