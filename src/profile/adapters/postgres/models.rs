//! Diesel row models for profiles.

use super::schema::profiles;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Profile record, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Relative avatar storage path.
    pub avatar: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
