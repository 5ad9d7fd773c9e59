//! Shared wiring for in-memory integration tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use tasktrack::{
    notification::{
        adapters::memory::InMemoryNotificationRepository, services::NotificationService,
    },
    profile::{adapters::memory::InMemoryProfileRepository, services::ProfileService},
    task::{
        adapters::memory::InMemoryTaskRepository,
        services::{TaskLifecycleService, TaskQueryService},
    },
    user::{
        adapters::memory::InMemoryUserDirectory,
        domain::{UserId, UserRef, Username},
        services::UserSearchService,
    },
};

/// Clock frozen at a chosen instant.
#[derive(Debug)]
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    /// Noon UTC on the given day.
    #[must_use]
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid calendar date");
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub type Lifecycle = TaskLifecycleService<InMemoryTaskRepository, InMemoryUserDirectory, TestClock>;
pub type Queries = TaskQueryService<InMemoryTaskRepository, TestClock>;
pub type Inbox = NotificationService<InMemoryNotificationRepository, TestClock>;
pub type Profiles = ProfileService<InMemoryProfileRepository, TestClock>;
pub type Search = UserSearchService<InMemoryUserDirectory>;

/// Every service wired over one shared in-memory store.
pub struct Workspace {
    pub clock: Arc<TestClock>,
    pub tasks: Lifecycle,
    pub queries: Queries,
    pub inbox: Inbox,
    pub profiles: Profiles,
    pub search: Search,
    pub repository: Arc<InMemoryTaskRepository>,
    pub ana: UserId,
    pub ben: UserId,
    pub cleo: UserId,
    pub dan: UserId,
}

/// Builds a workspace with users `ana`, `ben`, `cleo` and `dan`.
#[fixture]
pub fn workspace() -> Workspace {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let mut ids = Vec::new();
    for name in ["ana", "ben", "cleo", "dan"] {
        let id = UserId::new();
        let username = Username::new(name).expect("valid username");
        directory
            .insert(UserRef::new(id, username))
            .expect("directory insert");
        ids.push(id);
    }
    let [ana, ben, cleo, dan] = ids.as_slice() else {
        panic!("four users expected");
    };

    let clock = Arc::new(TestClock::on(2026, 4, 1));
    let notifications = InMemoryNotificationRepository::new();
    let repository = Arc::new(InMemoryTaskRepository::with_notifications(
        notifications.clone(),
    ));

    Workspace {
        tasks: TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&directory),
            Arc::clone(&clock),
        ),
        queries: TaskQueryService::new(Arc::clone(&repository), Arc::clone(&clock)),
        inbox: NotificationService::new(Arc::new(notifications), Arc::clone(&clock)),
        profiles: ProfileService::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::clone(&clock),
        ),
        search: UserSearchService::new(directory),
        clock,
        repository,
        ana: *ana,
        ben: *ben,
        cleo: *cleo,
        dan: *dan,
    }
}
