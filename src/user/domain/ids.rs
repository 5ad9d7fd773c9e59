//! Identifier and validated scalar types for user references.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Stable identifier of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login name of a user, unique within the directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Maximum username length accepted by the directory.
    pub const MAX_LENGTH: usize = 150;

    /// Creates a validated username.
    ///
    /// Surrounding whitespace is trimmed. Case is preserved because the
    /// directory matches usernames exactly.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError`] when the value is empty, too long, or
    /// contains whitespace or commas.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyUsername);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(UserDomainError::UsernameTooLong(trimmed.to_owned()));
        }
        if trimmed.chars().any(|ch| ch.is_whitespace() || ch == ',') {
            return Err(UserDomainError::InvalidUsername(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the username starts with `prefix`, ignoring case.
    #[must_use]
    pub fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        self.0.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

impl TryFrom<String> for Username {
    type Error = UserDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque authenticated-user handle supplied by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    id: UserId,
    username: Username,
}

impl UserRef {
    /// Creates a user reference.
    #[must_use]
    pub const fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

/// Splits a comma-separated assignee list into raw usernames.
///
/// Entries are trimmed, blanks are dropped and duplicates removed while the
/// first-seen order is kept.
#[must_use]
pub fn parse_username_list(raw: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert((*entry).to_owned()))
        .map(str::to_owned)
        .collect()
}
