//! Tests for the in-memory task repository and slug collision retries.

use std::sync::Arc;

use async_trait::async_trait;
use crate::notification::domain::{NotificationDraft, NotificationMessage};
use crate::notification::ports::NotificationRepository;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, Task, TaskComment, TaskId, TaskSlug, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use crate::test_support::FixedClock;
use crate::user::{adapters::memory::InMemoryUserDirectory, domain::UserId};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> FixedClock {
    FixedClock::on(2026, 8, 3)
}

fn slugged(title: &str, slug: &str, clock: &FixedClock) -> Task {
    let mut task = Task::new(
        NewTask::new(TaskTitle::new(title).expect("valid title"), UserId::new()),
        clock,
    );
    task.assign_slug(TaskSlug::new(slug).expect("valid slug"))
        .expect("fresh task has no slug");
    task
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_taken_slug_without_side_effects(clock: FixedClock) {
    let repository = InMemoryTaskRepository::new();
    let first = slugged("Launch", "launch", &clock);
    repository.store(&first, &[]).await.expect("first store");

    let second = slugged("Launch", "launch", &clock);
    let recipient = UserId::new();
    let draft = NotificationDraft::new(
        recipient,
        NotificationMessage::new("hello").expect("valid message"),
        Some(second.id()),
        &clock,
    );
    let result = repository.store(&second, &[draft]).await;

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateSlug(_))));
    assert_eq!(repository.find_by_id(second.id()).await.expect("lookup"), None);
    assert_eq!(
        repository
            .notifications()
            .unread_count(recipient)
            .await
            .expect("count"),
        0
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_task_is_not_found(clock: FixedClock) {
    let repository = InMemoryTaskRepository::new();
    let task = slugged("Ghost", "ghost", &clock);

    let result = repository.update(&task, &[]).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_on_unknown_task_is_not_found(clock: FixedClock) {
    let repository = InMemoryTaskRepository::new();
    let comment = TaskComment::new(
        TaskId::new(),
        UserId::new(),
        crate::task::domain::CommentText::new("hi").expect("valid text"),
        &clock,
    );

    let result = repository.add_comment(&comment).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
}

/// Repository whose existence check is always stale, so every collision is
/// only discovered by the write.
struct StaleSlugCheck {
    inner: InMemoryTaskRepository,
}

#[async_trait]
impl TaskRepository for StaleSlugCheck {
    async fn store(&self, task: &Task, notifications: &[NotificationDraft]) -> TaskRepositoryResult<()> {
        self.inner.store(task, notifications).await
    }

    async fn update(&self, task: &Task, notifications: &[NotificationDraft]) -> TaskRepositoryResult<()> {
        self.inner.update(task, notifications).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_slug(&self, slug: &TaskSlug) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_slug(slug).await
    }

    async fn slug_exists(&self, _slug: &TaskSlug) -> TaskRepositoryResult<bool> {
        Ok(false)
    }

    async fn list_visible_to(&self, user: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.list_visible_to(user).await
    }

    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()> {
        self.inner.add_comment(comment).await
    }

    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>> {
        self.inner.comments_for(task_id).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slug_collision_on_write_retries_next_counter() {
    let inner = InMemoryTaskRepository::new();
    let service = TaskLifecycleService::new(
        Arc::new(StaleSlugCheck {
            inner: inner.clone(),
        }),
        Arc::new(InMemoryUserDirectory::new()),
        Arc::new(FixedClock::on(2026, 8, 3)),
    );
    let creator = UserId::new();

    let first = service
        .create_task(CreateTaskRequest::new("Launch Plan"), creator)
        .await
        .expect("first create");
    let second = service
        .create_task(CreateTaskRequest::new("Launch Plan"), creator)
        .await
        .expect("second create retries");
    let third = service
        .create_task(CreateTaskRequest::new("Launch Plan"), creator)
        .await
        .expect("third create retries");

    let slugs: Vec<Option<&str>> = [&first, &second, &third]
        .iter()
        .map(|task| task.slug().map(TaskSlug::as_str))
        .collect();
    assert_eq!(
        slugs,
        vec![Some("launch-plan"), Some("launch-plan-1"), Some("launch-plan-2")]
    );
    assert_eq!(inner.list_visible_to(creator).await.expect("list").len(), 3);
}
