//! In-memory profile repository for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::profile::{
    domain::Profile,
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory profile repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: &impl std::fmt::Display) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(&self, user: UserId) -> ProfileRepositoryResult<Option<Profile>> {
        let profiles = self.profiles.read().map_err(|err| lock_error(&err))?;
        Ok(profiles.get(&user).cloned())
    }

    async fn insert(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut profiles = self.profiles.write().map_err(|err| lock_error(&err))?;
        if profiles.contains_key(&profile.user()) {
            return Err(ProfileRepositoryError::DuplicateProfile(profile.user()));
        }
        profiles.insert(profile.user(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut profiles = self.profiles.write().map_err(|err| lock_error(&err))?;
        let Some(stored) = profiles.get_mut(&profile.user()) else {
            return Err(ProfileRepositoryError::NotFound(profile.user()));
        };
        *stored = profile.clone();
        Ok(())
    }
}
