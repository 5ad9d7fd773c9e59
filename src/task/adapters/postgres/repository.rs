//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{AssigneeRow, CommentRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::{task_assignees, task_comments, tasks},
};
use crate::notification::adapters::postgres::{
    models::NewNotificationRow, schema::notifications,
};
use crate::notification::domain::NotificationDraft;
use crate::task::{
    domain::{
        CommentId, CommentText, PersistedCommentData, PersistedTaskData, Task, TaskComment,
        TaskId, TaskPriority, TaskSlug, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeMap, BTreeSet};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

const SLUG_UNIQUE_CONSTRAINT: &str = "idx_tasks_slug_unique";

/// `PostgreSQL`-backed task repository.
///
/// Task, collaborator and notification rows for one write share a single
/// transaction.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(
        &self,
        task: &Task,
        notifications: &[NotificationDraft],
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let slug = task.slug().cloned();
        let new_row = to_new_row(task);
        let assignee_rows = to_assignee_rows(task);
        let notification_rows = to_notification_rows(notifications);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(tx)
                    .map_err(|err| map_write_error(err, task_id, slug.as_ref()))?;
                insert_links(tx, &assignee_rows, &notification_rows)
            })
        })
        .await
    }

    async fn update(
        &self,
        task: &Task,
        notifications: &[NotificationDraft],
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let slug = task.slug().cloned();
        let changeset = to_changeset(task);
        let assignee_rows = to_assignee_rows(task);
        let notification_rows = to_notification_rows(notifications);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set(&changeset)
                    .execute(tx)
                    .map_err(|err| map_write_error(err, task_id, slug.as_ref()))?;
                if updated == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }
                diesel::delete(
                    task_assignees::table.filter(task_assignees::task_id.eq(task_id.into_inner())),
                )
                .execute(tx)?;
                insert_links(tx, &assignee_rows, &notification_rows)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Comments, collaborator links and notifications cascade.
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(|found| load_task(connection, found)).transpose()
        })
        .await
    }

    async fn find_by_slug(&self, slug: &TaskSlug) -> TaskRepositoryResult<Option<Task>> {
        let lookup = slug.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::slug.eq(&lookup))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(|found| load_task(connection, found)).transpose()
        })
        .await
    }

    async fn slug_exists(&self, slug: &TaskSlug) -> TaskRepositoryResult<bool> {
        let lookup = slug.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::slug.eq(&lookup)),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn list_visible_to(&self, user: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let user_uuid = user.into_inner();
        self.run_blocking(move |connection| {
            let assigned = task_assignees::table
                .filter(task_assignees::user_id.eq(user_uuid))
                .select(task_assignees::task_id);
            let rows = tasks::table
                .filter(
                    tasks::creator_id
                        .eq(user_uuid)
                        .or(tasks::id.eq_any(assigned)),
                )
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
            let mut assignees = load_assignees(connection, &ids)?;
            rows.into_iter()
                .map(|row| {
                    let members = assignees.remove(&row.id).unwrap_or_default();
                    row_to_task(row, members)
                })
                .collect()
        })
        .await
    }

    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()> {
        let task_id = comment.task_id();
        let row = CommentRow {
            id: comment.id().into_inner(),
            task_id: task_id.into_inner(),
            user_id: comment.author().into_inner(),
            text: comment.text().as_str().to_owned(),
            created_at: comment.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(task_comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>> {
        self.run_blocking(move |connection| {
            let rows = task_comments::table
                .filter(task_comments::task_id.eq(task_id.into_inner()))
                .order((task_comments::created_at.asc(), task_comments::id.asc()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }
}

fn insert_links(
    connection: &mut PgConnection,
    assignee_rows: &[AssigneeRow],
    notification_rows: &[NewNotificationRow],
) -> TaskRepositoryResult<()> {
    if !assignee_rows.is_empty() {
        diesel::insert_into(task_assignees::table)
            .values(assignee_rows)
            .execute(connection)?;
    }
    if !notification_rows.is_empty() {
        diesel::insert_into(notifications::table)
            .values(notification_rows)
            .execute(connection)?;
    }
    Ok(())
}

fn map_write_error(err: DieselError, task_id: TaskId, slug: Option<&TaskSlug>) -> TaskRepositoryError {
    match (&err, slug) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info), Some(taken))
            if is_slug_unique_violation(info.as_ref()) =>
        {
            TaskRepositoryError::DuplicateSlug(taken.clone())
        }
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), _) => {
            TaskRepositoryError::DuplicateTask(task_id)
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

fn is_slug_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == SLUG_UNIQUE_CONSTRAINT)
}

fn load_task(connection: &mut PgConnection, row: TaskRow) -> TaskRepositoryResult<Task> {
    let mut assignees = load_assignees(connection, &[row.id])?;
    let members = assignees.remove(&row.id).unwrap_or_default();
    row_to_task(row, members)
}

fn load_assignees(
    connection: &mut PgConnection,
    task_ids: &[uuid::Uuid],
) -> TaskRepositoryResult<BTreeMap<uuid::Uuid, BTreeSet<UserId>>> {
    if task_ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let rows = task_assignees::table
        .filter(task_assignees::task_id.eq_any(task_ids))
        .select(AssigneeRow::as_select())
        .load::<AssigneeRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;

    let mut grouped: BTreeMap<uuid::Uuid, BTreeSet<UserId>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry(row.task_id)
            .or_default()
            .insert(UserId::from_uuid(row.user_id));
    }
    Ok(grouped)
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        slug: task.slug().map(|slug| slug.as_str().to_owned()),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        creator_id: task.creator().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        slug: task.slug().map(|slug| slug.as_str().to_owned()),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn to_assignee_rows(task: &Task) -> Vec<AssigneeRow> {
    task.assignees()
        .iter()
        .map(|user| AssigneeRow {
            task_id: task.id().into_inner(),
            user_id: user.into_inner(),
        })
        .collect()
}

fn to_notification_rows(drafts: &[NotificationDraft]) -> Vec<NewNotificationRow> {
    drafts.iter().map(NewNotificationRow::from).collect()
}

fn row_to_task(row: TaskRow, assignees: BTreeSet<UserId>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        slug: persisted_slug,
        title: persisted_title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        due_date,
        creator_id,
        created_at,
        updated_at,
        completed_at,
    } = row;

    let slug = persisted_slug
        .map(TaskSlug::new)
        .transpose()
        .map_err(TaskRepositoryError::invalid_persisted_data)?;
    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        slug,
        title,
        description,
        status,
        priority,
        due_date,
        creator: UserId::from_uuid(creator_id),
        assignees,
        created_at,
        updated_at,
        completed_at,
    }))
}

fn row_to_comment(row: CommentRow) -> TaskRepositoryResult<TaskComment> {
    let text = CommentText::new(row.text).map_err(TaskRepositoryError::invalid_persisted_data)?;
    Ok(TaskComment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        author: UserId::from_uuid(row.user_id),
        text,
        created_at: row.created_at,
    }))
}
