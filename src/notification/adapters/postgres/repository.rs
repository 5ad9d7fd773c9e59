//! `PostgreSQL` repository implementation for notifications.

use super::{models::NotificationRow, schema::notifications};
use crate::notification::{
    domain::{Notification, NotificationId, NotificationMessage, PersistedNotificationData},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by the notification repository.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: NotificationPgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn unread_count(&self, user: UserId) -> NotificationRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let count: i64 = notifications::table
                .filter(notifications::user_id.eq(user.into_inner()))
                .filter(notifications::is_read.eq(false))
                .count()
                .get_result(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            usize::try_from(count).map_err(NotificationRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn list_for_user(
        &self,
        user: UserId,
        after: Option<NotificationId>,
        limit: usize,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let row_limit = i64::try_from(limit).map_err(NotificationRepositoryError::persistence)?;
        let after_id = after
            .map(|id| i64::try_from(id.value()))
            .transpose()
            .map_err(NotificationRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let mut query = notifications::table
                .filter(notifications::user_id.eq(user.into_inner()))
                .into_boxed();
            if let Some(since) = after_id {
                query = query.filter(notifications::id.gt(since));
            }
            let rows = query
                .order((notifications::created_at.desc(), notifications::id.desc()))
                .limit(row_limit)
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_notification).collect()
        })
        .await
    }

    async fn mark_all_read(&self, user: UserId) -> NotificationRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::update(
                notifications::table
                    .filter(notifications::user_id.eq(user.into_inner()))
                    .filter(notifications::is_read.eq(false)),
            )
            .set(notifications::is_read.eq(true))
            .execute(connection)
            .map_err(NotificationRepositoryError::persistence)
        })
        .await
    }

    async fn mark_read(
        &self,
        user: UserId,
        id: NotificationId,
    ) -> NotificationRepositoryResult<bool> {
        let row_id = i64::try_from(id.value()).map_err(NotificationRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                notifications::table
                    .filter(notifications::id.eq(row_id))
                    .filter(notifications::user_id.eq(user.into_inner())),
            )
            .set(notifications::is_read.eq(true))
            .execute(connection)
            .map_err(NotificationRepositoryError::persistence)?;
            Ok(updated > 0)
        })
        .await
    }
}

fn row_to_notification(row: NotificationRow) -> NotificationRepositoryResult<Notification> {
    let raw_id = u64::try_from(row.id).map_err(NotificationRepositoryError::invalid_persisted_data)?;
    let id = NotificationId::new(raw_id).map_err(NotificationRepositoryError::invalid_persisted_data)?;
    let message = NotificationMessage::new(row.message)
        .map_err(NotificationRepositoryError::invalid_persisted_data)?;
    Ok(Notification::from_persisted(PersistedNotificationData {
        id,
        recipient: UserId::from_uuid(row.user_id),
        message,
        is_read: row.is_read,
        task_id: row.task_id.map(TaskId::from_uuid),
        created_at: row.created_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::row_to_notification;
    use crate::notification::adapters::postgres::models::NotificationRow;
    use crate::notification::ports::NotificationRepositoryError;
    use chrono::Utc;
    use rstest::rstest;

    fn row(id: i64, message: &str) -> NotificationRow {
        NotificationRow {
            id,
            user_id: uuid::Uuid::new_v4(),
            message: message.to_owned(),
            is_read: true,
            task_id: Some(uuid::Uuid::new_v4()),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn converts_valid_row() {
        let source = row(7, "Task \"Launch\" status changed to Completed.");
        let task_id = source.task_id;
        let notification = row_to_notification(source).expect("row should convert");
        assert_eq!(notification.id().value(), 7);
        assert!(notification.is_read());
        assert_eq!(notification.task_id().map(|id| id.into_inner()), task_id);
    }

    #[rstest]
    #[case(0, "hello")]
    #[case(-3, "hello")]
    #[case(4, "   ")]
    fn rejects_corrupt_rows(#[case] id: i64, #[case] message: &str) {
        let result = row_to_notification(row(id, message));
        assert!(matches!(
            result,
            Err(NotificationRepositoryError::InvalidPersistedData(_))
        ));
    }
}
