//! Port contracts for profile persistence.

mod repository;

pub use repository::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult};
