//! Profile aggregate.

use super::AvatarPath;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Per-user profile, one-to-one with the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    user: UserId,
    avatar: Option<AvatarPath>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Owning user.
    pub user: UserId,
    /// Stored avatar path.
    pub avatar: Option<AvatarPath>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates an empty profile for `user`.
    #[must_use]
    pub fn new(user: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            user,
            avatar: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            user: data.user,
            avatar: data.avatar,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the avatar path, if one is set.
    #[must_use]
    pub const fn avatar(&self) -> Option<&AvatarPath> {
        self.avatar.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the avatar and returns the previous one.
    pub fn replace_avatar(
        &mut self,
        avatar: Option<AvatarPath>,
        clock: &impl Clock,
    ) -> Option<AvatarPath> {
        self.updated_at = clock.utc();
        std::mem::replace(&mut self.avatar, avatar)
    }
}
