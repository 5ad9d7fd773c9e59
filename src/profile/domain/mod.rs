//! Domain model for user profiles.

mod avatar;
mod error;
mod profile;

pub use avatar::AvatarPath;
pub use error::ProfileDomainError;
pub use profile::{PersistedProfileData, Profile};
