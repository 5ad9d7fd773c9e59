//! Tests for the owner and collaborator access policy.

use crate::task::domain::{
    NewTask, Task, TaskCapability, TaskTitle, can_edit, can_update_status, can_view,
};
use crate::test_support::FixedClock;
use crate::user::domain::UserId;
use rstest::{fixture, rstest};
use std::collections::BTreeSet;

struct Shared {
    creator: UserId,
    collaborator: UserId,
    stranger: UserId,
    task: Task,
}

#[fixture]
fn shared() -> Shared {
    let clock = FixedClock::on(2026, 1, 15);
    let creator = UserId::new();
    let collaborator = UserId::new();
    let mut new_task = NewTask::new(TaskTitle::new("Quarterly review").expect("valid title"), creator);
    new_task.assignees = BTreeSet::from([collaborator]);
    Shared {
        creator,
        collaborator,
        stranger: UserId::new(),
        task: Task::new(new_task, &clock),
    }
}

#[rstest]
fn capabilities_follow_membership(shared: Shared) {
    assert_eq!(shared.task.capability_of(shared.creator), TaskCapability::Owner);
    assert_eq!(
        shared.task.capability_of(shared.collaborator),
        TaskCapability::Collaborator
    );
    assert_eq!(shared.task.capability_of(shared.stranger), TaskCapability::None);
}

#[rstest]
#[case(TaskCapability::Owner, true, true, true)]
#[case(TaskCapability::Collaborator, true, false, true)]
#[case(TaskCapability::None, false, false, false)]
fn capability_flags(
    #[case] capability: TaskCapability,
    #[case] view: bool,
    #[case] edit: bool,
    #[case] status: bool,
) {
    assert_eq!(capability.can_view(), view);
    assert_eq!(capability.can_edit(), edit);
    assert_eq!(capability.can_update_status(), status);
}

#[rstest]
fn edit_implies_status_update_implies_view(shared: Shared) {
    for user in [shared.creator, shared.collaborator, shared.stranger] {
        if can_edit(user, &shared.task) {
            assert!(can_update_status(user, &shared.task));
        }
        if can_update_status(user, &shared.task) {
            assert!(can_view(user, &shared.task));
        }
    }
}

#[rstest]
fn creator_assigned_to_own_task_stays_owner() {
    let clock = FixedClock::on(2026, 1, 15);
    let creator = UserId::new();
    let mut new_task = NewTask::new(TaskTitle::new("Solo").expect("valid title"), creator);
    new_task.assignees = BTreeSet::from([creator]);
    let task = Task::new(new_task, &clock);

    assert_eq!(task.capability_of(creator), TaskCapability::Owner);
}
