//! `PostgreSQL` implementation of the user directory.

use super::{models::UserRow, schema::users};
use crate::user::{
    domain::{UserId, UserRef, Username},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by the user directory.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: UserPgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserDirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserRef>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_usernames(
        &self,
        usernames: &[Username],
    ) -> UserDirectoryResult<Vec<UserRef>> {
        let names: Vec<String> = usernames.iter().map(|name| name.as_str().to_owned()).collect();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::username.eq_any(&names))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<UserRef>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::id.eq_any(&uuids))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn search_by_prefix(
        &self,
        prefix: &str,
        exclude: UserId,
        limit: usize,
    ) -> UserDirectoryResult<Vec<UserRef>> {
        let pattern = format!("{}%", escape_like(prefix));
        let row_limit = i64::try_from(limit).map_err(UserDirectoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::username.ilike(&pattern))
                .filter(users::id.ne(exclude.into_inner()))
                .order(users::username.asc())
                .limit(row_limit)
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> UserDirectoryResult<UserRef> {
    let username = Username::new(row.username).map_err(UserDirectoryError::invalid_persisted_data)?;
    Ok(UserRef::new(UserId::from_uuid(row.id), username))
}

/// Escapes `LIKE` metacharacters so the prefix matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
