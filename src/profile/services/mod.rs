//! Application services for profiles.

mod profile;

pub use profile::{ProfileService, ProfileServiceError};
