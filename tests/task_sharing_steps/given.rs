//! Given steps for task sharing BDD scenarios.

use super::world::{TaskSharingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktrack::{task::services::CreateTaskRequest, user::domain::parse_username_list};

#[given(r#"the users "{names}" are registered"#)]
fn users_are_registered(world: &mut TaskSharingWorld, names: String) -> Result<(), eyre::Report> {
    for name in parse_username_list(&names) {
        world.register(&name)?;
    }
    Ok(())
}

#[given(r#""{owner}" owns a task "{title}" shared with "{assignees}""#)]
fn owns_shared_task(
    world: &mut TaskSharingWorld,
    owner: String,
    title: String,
    assignees: String,
) -> Result<(), eyre::Report> {
    let creator = world.user(&owner)?;
    let request = CreateTaskRequest::new(title).with_assignee_list(&assignees);
    let task = run_async(world.service.create_task(request, creator))
        .wrap_err("create shared task for scenario")?;
    world.last_task = Some(task);
    Ok(())
}

#[given(r#""{owner}" owns a private task "{title}""#)]
fn owns_private_task(
    world: &mut TaskSharingWorld,
    owner: String,
    title: String,
) -> Result<(), eyre::Report> {
    let creator = world.user(&owner)?;
    let task = run_async(world.service.create_task(CreateTaskRequest::new(title), creator))
        .wrap_err("create private task for scenario")?;
    world.last_task = Some(task);
    Ok(())
}
