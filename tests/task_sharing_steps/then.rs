//! Then steps for task sharing BDD scenarios.

use super::world::{TaskSharingWorld, run_async};
use rstest_bdd_macros::then;
use tasktrack::task::services::TaskErrorKind;

fn refused_with(world: &TaskSharingWorld, expected: TaskErrorKind) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing request result"))?;
    match result {
        Err(err) if err.kind() == expected => Ok(()),
        other => Err(eyre::eyre!("expected {expected:?} error, got {other:?}")),
    }
}

#[then("the request is refused as forbidden")]
fn refused_as_forbidden(world: &TaskSharingWorld) -> Result<(), eyre::Report> {
    refused_with(world, TaskErrorKind::Forbidden)
}

#[then("the request is refused as not found")]
fn refused_as_not_found(world: &TaskSharingWorld) -> Result<(), eyre::Report> {
    refused_with(world, TaskErrorKind::NotFound)
}

#[then("the request is refused as invalid")]
fn refused_as_invalid(world: &TaskSharingWorld) -> Result<(), eyre::Report> {
    refused_with(world, TaskErrorKind::Validation)
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskSharingWorld, status: String) -> Result<(), eyre::Report> {
    let task = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    eyre::ensure!(
        task.status().as_str() == status,
        "expected status {status}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &TaskSharingWorld, title: String) -> Result<(), eyre::Report> {
    let stored = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let lookup = world.lookup()?;
    let reloaded = run_async(world.service.get_task(&lookup, stored.creator()))?;
    eyre::ensure!(
        reloaded.title().as_str() == title,
        "expected title {title}, found {}",
        reloaded.title()
    );
    Ok(())
}

#[then(r#"the task slug is "{slug}""#)]
fn task_slug_is(world: &TaskSharingWorld, slug: String) -> Result<(), eyre::Report> {
    let task = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let actual = task.slug().map(ToString::to_string);
    eyre::ensure!(
        actual.as_deref() == Some(slug.as_str()),
        "expected slug {slug}, found {actual:?}"
    );
    Ok(())
}

#[then(r#""{user}" has {count:usize} unread notifications"#)]
fn has_unread(world: &TaskSharingWorld, user: String, count: usize) -> Result<(), eyre::Report> {
    let id = world.user(&user)?;
    let unread = run_async(world.inbox.unread_count(id))?;
    eyre::ensure!(unread == count, "expected {count} unread for {user}, found {unread}");
    Ok(())
}
