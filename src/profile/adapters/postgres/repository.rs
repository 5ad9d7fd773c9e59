//! `PostgreSQL` repository implementation for profiles.

use super::{models::ProfileRow, schema::profiles};
use crate::profile::{
    domain::{AvatarPath, PersistedProfileData, Profile},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the profile repository.
pub type ProfilePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed profile repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: ProfilePgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProfilePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find(&self, user: UserId) -> ProfileRepositoryResult<Option<Profile>> {
        self.run_blocking(move |connection| {
            let row = profiles::table
                .filter(profiles::user_id.eq(user.into_inner()))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn insert(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let user = profile.user();
        let row = to_row(profile);
        self.run_blocking(move |connection| {
            diesel::insert_into(profiles::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateProfile(user)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let user = profile.user();
        let avatar = profile.avatar().map(|path| path.as_str().to_owned());
        let updated_at = profile.updated_at();
        self.run_blocking(move |connection| {
            let updated = diesel::update(profiles::table.filter(profiles::user_id.eq(user.into_inner())))
                .set((profiles::avatar.eq(avatar), profiles::updated_at.eq(updated_at)))
                .execute(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProfileRepositoryError::NotFound(user));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(profile: &Profile) -> ProfileRow {
    ProfileRow {
        user_id: profile.user().into_inner(),
        avatar: profile.avatar().map(|path| path.as_str().to_owned()),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}

fn row_to_profile(row: ProfileRow) -> ProfileRepositoryResult<Profile> {
    let avatar = row
        .avatar
        .map(AvatarPath::from_stored)
        .transpose()
        .map_err(ProfileRepositoryError::invalid_persisted_data)?;
    Ok(Profile::from_persisted(PersistedProfileData {
        user: UserId::from_uuid(row.user_id),
        avatar,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
