//! When steps for task sharing BDD scenarios.

use super::world::{TaskSharingWorld, run_async};
use rstest_bdd_macros::when;
use tasktrack::task::services::{CreateTaskRequest, TaskUpdate};

#[when(r#""{user}" sets the task status to "{status}""#)]
fn sets_status(
    world: &mut TaskSharingWorld,
    user: String,
    status: String,
) -> Result<(), eyre::Report> {
    let actor = world.user(&user)?;
    let lookup = world.lookup()?;
    let update = TaskUpdate::new().with_status(status);
    let result = run_async(world.service.update_task(&lookup, actor, update, true));
    record(world, result);
    Ok(())
}

#[when(r#""{user}" renames the task to "{title}""#)]
fn renames_task(
    world: &mut TaskSharingWorld,
    user: String,
    title: String,
) -> Result<(), eyre::Report> {
    let actor = world.user(&user)?;
    let lookup = world.lookup()?;
    let update = TaskUpdate::new().with_title(title);
    let result = run_async(world.service.update_task(&lookup, actor, update, true));
    record(world, result);
    Ok(())
}

#[when(r#""{user}" opens the task"#)]
fn opens_task(world: &mut TaskSharingWorld, user: String) -> Result<(), eyre::Report> {
    let actor = world.user(&user)?;
    let lookup = world.lookup()?;
    let result = run_async(world.service.get_task(&lookup, actor));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#""{owner}" creates a task "{title}" shared with "{assignees}""#)]
fn creates_shared_task(
    world: &mut TaskSharingWorld,
    owner: String,
    title: String,
    assignees: String,
) -> Result<(), eyre::Report> {
    let creator = world.user(&owner)?;
    let request = CreateTaskRequest::new(title).with_assignee_list(&assignees);
    let result = run_async(world.service.create_task(request, creator));
    record(world, result);
    Ok(())
}

fn record(
    world: &mut TaskSharingWorld,
    result: Result<tasktrack::task::domain::Task, tasktrack::task::services::TaskLifecycleError>,
) {
    if let Ok(ref task) = result {
        world.last_task = Some(task.clone());
    }
    world.last_result = Some(result);
}
