//! Domain model for user identity references.

mod error;
mod ids;

pub use error::UserDomainError;
pub use ids::{UserId, UserRef, Username, parse_username_list};
