//! Inbox behaviour over notifications produced by task writes.

use super::helpers::{Workspace, workspace};
use chrono::Duration;
use rstest::rstest;
use tasktrack::{
    notification::services::NotificationServiceError,
    task::{
        domain::TaskLookup,
        services::{CreateTaskRequest, TaskUpdate},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn polling_with_cursor_returns_only_newer_entries(
    workspace: Workspace,
) -> eyre::Result<()> {
    let ws = workspace;
    let task = ws
        .tasks
        .create_task(
            CreateTaskRequest::new("Budget").with_assignees(["ben"]),
            ws.ana,
        )
        .await?;
    let first_poll = ws.inbox.recent(ws.ben, None).await?;
    let cursor = first_poll
        .first()
        .map(|entry| entry.id)
        .ok_or_else(|| eyre::eyre!("ben should have one notification"))?;

    ws.clock.advance(Duration::hours(2));
    ws.tasks
        .update_task(
            &TaskLookup::Id(task.id()),
            ws.ana,
            TaskUpdate::new().with_status("completed"),
            true,
        )
        .await?;
    ws.clock.advance(Duration::minutes(5));

    let second_poll = ws.inbox.recent(ws.ben, Some(cursor)).await?;
    assert_eq!(second_poll.len(), 1);
    let entry = second_poll
        .first()
        .ok_or_else(|| eyre::eyre!("expected one new notification"))?;
    assert_eq!(entry.message, "Task \"Budget\" status changed to Completed.");
    assert_eq!(entry.time, "5 minutes ago");
    assert!(!entry.is_read);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opening_inbox_marks_everything_read(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    for title in ["One", "Two"] {
        ws.tasks
            .create_task(CreateTaskRequest::new(title).with_assignees(["cleo"]), ws.ana)
            .await?;
    }

    let page = ws.inbox.open_inbox(ws.cleo).await?;
    let reopened = ws.inbox.open_inbox(ws.cleo).await?;

    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|notification| !notification.is_read()));
    assert!(reopened.iter().all(|notification| notification.is_read()));
    assert_eq!(ws.inbox.unread_count(ws.cleo).await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_cannot_mark_each_others_notifications(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    ws.tasks
        .create_task(CreateTaskRequest::new("Mine").with_assignees(["ben"]), ws.ana)
        .await?;
    let id = ws
        .inbox
        .recent(ws.ben, None)
        .await?
        .first()
        .map(|entry| entry.id)
        .ok_or_else(|| eyre::eyre!("ben should have one notification"))?;

    let stolen = ws.inbox.mark_read(ws.dan, id).await;
    assert!(matches!(stolen, Err(NotificationServiceError::NotFound(_))));
    assert_eq!(ws.inbox.unread_count(ws.ben).await?, 1);

    ws.inbox.mark_read(ws.ben, id).await?;
    assert_eq!(ws.inbox.unread_count(ws.ben).await?, 0);
    Ok(())
}
