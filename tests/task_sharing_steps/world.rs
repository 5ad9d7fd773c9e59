//! Shared world state for task sharing BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrack::{
    notification::{
        adapters::memory::InMemoryNotificationRepository, services::NotificationService,
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskLookup},
        services::{TaskLifecycleError, TaskLifecycleService},
    },
    user::{
        adapters::memory::InMemoryUserDirectory,
        domain::{UserId, UserRef, Username},
    },
};

/// Lifecycle service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryUserDirectory, DefaultClock>;

/// Inbox service type used by the BDD world.
pub type TestInbox = NotificationService<InMemoryNotificationRepository, DefaultClock>;

/// Scenario world for task sharing behaviour tests.
pub struct TaskSharingWorld {
    pub directory: Arc<InMemoryUserDirectory>,
    pub service: TestTaskService,
    pub inbox: TestInbox,
    pub users: HashMap<String, UserId>,
    pub last_task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskSharingWorld {
    /// Creates a world with an empty directory and store.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let notifications = InMemoryNotificationRepository::new();
        let clock = Arc::new(DefaultClock);
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::with_notifications(
                notifications.clone(),
            )),
            Arc::clone(&directory),
            Arc::clone(&clock),
        );

        Self {
            directory,
            service,
            inbox: NotificationService::new(Arc::new(notifications), clock),
            users: HashMap::new(),
            last_task: None,
            last_result: None,
        }
    }

    /// Registers `name` in the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the insert fails.
    pub fn register(&mut self, name: &str) -> Result<(), eyre::Report> {
        let id = UserId::new();
        self.directory.insert(UserRef::new(id, Username::new(name)?))?;
        self.users.insert(name.to_owned(), id);
        Ok(())
    }

    /// Resolves a registered username.
    ///
    /// # Errors
    ///
    /// Returns an error if the user was never registered.
    pub fn user(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown scenario user {name}"))
    }

    /// Returns a lookup for the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn lookup(&self) -> Result<TaskLookup, eyre::Report> {
        self.last_task
            .as_ref()
            .map(|task| TaskLookup::Id(task.id()))
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskSharingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskSharingWorld {
    TaskSharingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
