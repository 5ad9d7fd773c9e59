//! Port contracts consumed from the authentication collaborator.

pub mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
