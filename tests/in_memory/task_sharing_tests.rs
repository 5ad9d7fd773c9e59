//! End-to-end sharing flows across the lifecycle and inbox services.

use super::helpers::{Workspace, workspace};
use chrono::Duration;
use rstest::rstest;
use tasktrack::task::{
    domain::{TaskLookup, TaskStatus},
    services::{CreateTaskRequest, TaskErrorKind, TaskUpdate},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborator_progress_reaches_owner_inbox(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    let task = ws
        .tasks
        .create_task(
            CreateTaskRequest::new("Quarterly Report").with_assignee_list("ben, cleo"),
            ws.ana,
        )
        .await?;
    eyre::ensure!(ws.inbox.unread_count(ws.ben).await? == 1, "ben should be told");
    eyre::ensure!(ws.inbox.unread_count(ws.ana).await? == 0, "owner is not assigned");

    ws.clock.advance(Duration::minutes(3));
    let lookup = TaskLookup::parse("quarterly-report")
        .ok_or_else(|| eyre::eyre!("slug should parse"))?;
    let updated = ws
        .tasks
        .update_task(
            &lookup,
            ws.ben,
            TaskUpdate::new().with_status("in_progress"),
            true,
        )
        .await?;

    assert_eq!(updated.id(), task.id());
    assert_eq!(updated.status(), TaskStatus::InProgress);
    let owner_feed = ws.inbox.recent(ws.ana, None).await?;
    let latest = owner_feed
        .first()
        .ok_or_else(|| eyre::eyre!("owner should have a notification"))?;
    assert_eq!(
        latest.message,
        "Task \"Quarterly Report\" status changed to In Progress."
    );
    assert_eq!(latest.time, "0 minutes ago");
    assert_eq!(latest.task_id, Some(task.id()));
    assert_eq!(ws.inbox.unread_count(ws.cleo).await?, 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsider_cannot_tell_task_exists(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    let task = ws
        .tasks
        .create_task(CreateTaskRequest::new("Private"), ws.ana)
        .await?;

    let by_id = ws.tasks.get_task(&TaskLookup::Id(task.id()), ws.dan).await;
    let missing = TaskLookup::parse("no-such-task")
        .ok_or_else(|| eyre::eyre!("slug should parse"))?;
    let absent = ws.tasks.get_task(&missing, ws.dan).await;

    let hidden_kind = by_id.err().map(|err| err.kind());
    let absent_kind = absent.err().map(|err| err.kind());
    assert_eq!(hidden_kind, Some(TaskErrorKind::NotFound));
    assert_eq!(hidden_kind, absent_kind);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_titles_get_distinct_slugs(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    let mut slugs = Vec::new();
    for owner in [ws.ana, ws.ben, ws.cleo] {
        let task = ws
            .tasks
            .create_task(CreateTaskRequest::new("Weekly Sync"), owner)
            .await?;
        slugs.push(task.slug().map(ToString::to_string));
    }

    assert_eq!(
        slugs,
        vec![
            Some("weekly-sync".to_owned()),
            Some("weekly-sync-1".to_owned()),
            Some("weekly-sync-2".to_owned()),
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_clears_its_trail(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    let task = ws
        .tasks
        .create_task(
            CreateTaskRequest::new("Short lived").with_assignees(["ben"]),
            ws.ana,
        )
        .await?;
    let lookup = TaskLookup::Id(task.id());
    ws.tasks.add_comment(&lookup, ws.ben, "on it").await?;

    let refused = ws.tasks.delete_task(&lookup, ws.ben).await;
    assert_eq!(
        refused.err().map(|err| err.kind()),
        Some(TaskErrorKind::Forbidden)
    );

    ws.tasks.delete_task(&lookup, ws.ana).await?;

    assert_eq!(ws.inbox.unread_count(ws.ben).await?, 0);
    assert_eq!(ws.repository.comment_count(task.id())?, 0);
    let gone = ws.tasks.get_task(&lookup, ws.ana).await;
    assert_eq!(gone.err().map(|err| err.kind()), Some(TaskErrorKind::NotFound));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_thread_is_shared_between_members(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    let task = ws
        .tasks
        .create_task(
            CreateTaskRequest::new("Design review").with_assignees(["cleo"]),
            ws.ana,
        )
        .await?;
    let lookup = TaskLookup::Id(task.id());

    ws.tasks.add_comment(&lookup, ws.ana, "draft attached").await?;
    ws.clock.advance(Duration::minutes(1));
    ws.tasks.add_comment(&lookup, ws.cleo, "looks good").await?;
    let blank = ws.tasks.add_comment(&lookup, ws.cleo, "   ").await?;
    let outsider = ws.tasks.list_comments(&lookup, ws.dan).await;

    let thread = ws.tasks.list_comments(&lookup, ws.cleo).await?;
    let texts: Vec<&str> = thread.iter().map(|comment| comment.text().as_str()).collect();
    assert_eq!(texts, ["draft attached", "looks good"]);
    assert!(blank.is_none());
    assert!(outsider.is_err());
    Ok(())
}
