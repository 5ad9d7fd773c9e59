//! Storage path of an uploaded avatar.

use super::ProfileDomainError;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative path `avatars/user_{id}/{filename}` of a stored avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarPath(String);

impl AvatarPath {
    /// Maximum stored path length.
    pub const MAX_LENGTH: usize = 255;

    /// Builds the storage path for a file uploaded by `user`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::InvalidAvatarFilename`] when `filename`
    /// is blank, is `.` or `..`, or contains a path separator, and
    /// [`ProfileDomainError::AvatarPathTooLong`] when the path would not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasktrack::profile::domain::AvatarPath;
    /// use tasktrack::user::domain::UserId;
    /// use uuid::Uuid;
    ///
    /// let user = UserId::from_uuid(Uuid::nil());
    /// let path = AvatarPath::for_upload(user, "me.png").expect("valid name");
    /// assert_eq!(
    ///     path.as_str(),
    ///     "avatars/user_00000000-0000-0000-0000-000000000000/me.png"
    /// );
    /// ```
    pub fn for_upload(user: UserId, filename: &str) -> Result<Self, ProfileDomainError> {
        let name = filename.trim();
        let is_valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if !is_valid {
            return Err(ProfileDomainError::InvalidAvatarFilename(filename.to_owned()));
        }
        Self::from_stored(format!("avatars/user_{user}/{name}"))
    }

    /// Wraps a path read back from storage.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::AvatarPathTooLong`] when the path is too
    /// long to have been stored.
    pub fn from_stored(path: impl Into<String>) -> Result<Self, ProfileDomainError> {
        let raw = path.into();
        if raw.chars().count() > Self::MAX_LENGTH {
            return Err(ProfileDomainError::AvatarPathTooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvatarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
