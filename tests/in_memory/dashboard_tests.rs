//! Dashboard, search and profile services over a shared workspace.

use super::helpers::{Workspace, workspace};
use chrono::NaiveDate;
use rstest::rstest;
use tasktrack::task::{
    domain::{TaskFilter, TaskLookup, TaskPriority},
    services::{CreateTaskRequest, TaskUpdate},
};

fn date(year: i32, month: u32, day: u32) -> eyre::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| eyre::eyre!("invalid date"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_splits_created_and_assigned(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    ws.tasks
        .create_task(
            CreateTaskRequest::new("Own overdue").with_due_date(date(2026, 3, 1)?),
            ws.ana,
        )
        .await?;
    let shared = ws
        .tasks
        .create_task(
            CreateTaskRequest::new("Shared")
                .with_priority("high")
                .with_assignees(["ana"]),
            ws.ben,
        )
        .await?;
    ws.tasks
        .create_task(CreateTaskRequest::new("Unrelated"), ws.cleo)
        .await?;
    ws.tasks
        .update_task(
            &TaskLookup::Id(shared.id()),
            ws.ana,
            TaskUpdate::new().with_status("completed"),
            true,
        )
        .await?;

    let board = ws.queries.dashboard(ws.ana, &TaskFilter::new()).await?;

    assert_eq!(board.created.len(), 1);
    assert_eq!(board.assigned.len(), 1);
    assert_eq!(board.stats.total, 2);
    assert_eq!(board.stats.overdue, 1);
    assert_eq!(board.stats.completed_this_week, 1);
    assert_eq!(board.stats.completion_percentage, 50.0);

    let high_only = ws
        .queries
        .dashboard(ws.ana, &TaskFilter::new().with_priority(TaskPriority::High))
        .await?;
    assert!(high_only.created.is_empty());
    assert_eq!(high_only.assigned.len(), 1);
    assert_eq!(high_only.stats.total, 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn visible_list_excludes_other_peoples_tasks(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;
    ws.tasks
        .create_task(CreateTaskRequest::new("Ben's"), ws.ben)
        .await?;
    let mine = ws
        .tasks
        .create_task(CreateTaskRequest::new("Dan's"), ws.dan)
        .await?;

    let visible = ws.queries.list_visible_tasks(ws.dan).await?;
    let ids: Vec<_> = visible.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![mine.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn username_search_skips_requester(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;

    let found = ws.search.search(ws.ana, "A").await?;
    let others = ws.search.search(ws.ben, "a").await?;

    assert!(found.is_empty());
    let names: Vec<&str> = others.iter().map(|name| name.as_str()).collect();
    assert_eq!(names, ["ana"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn avatar_upload_is_namespaced(workspace: Workspace) -> eyre::Result<()> {
    let ws = workspace;

    let profile = ws.profiles.set_avatar(ws.cleo, "face.png").await?;

    let expected = format!("avatars/user_{}/face.png", ws.cleo);
    assert_eq!(
        profile.avatar().map(|path| path.as_str()),
        Some(expected.as_str())
    );
    Ok(())
}
