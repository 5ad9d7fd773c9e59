//! `PostgreSQL` adapter for profiles.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresProfileRepository, ProfilePgPool};
