//! `PostgreSQL` adapter for notification reads and read-flag updates.

pub(crate) mod models;
mod repository;
pub(crate) mod schema;

pub use repository::{NotificationPgPool, PostgresNotificationRepository};
