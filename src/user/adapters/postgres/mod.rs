//! `PostgreSQL` adapter reading the external user table.

mod directory;
mod models;
pub(crate) mod schema;

pub use directory::{PostgresUserDirectory, UserPgPool};
