//! Tests for the profile service.

use std::sync::Arc;

use crate::profile::{
    adapters::memory::InMemoryProfileRepository,
    ports::ProfileRepository,
    services::{ProfileService, ProfileServiceError},
};
use crate::test_support::FixedClock;
use crate::user::domain::UserId;
use rstest::{fixture, rstest};

type TestService = ProfileService<InMemoryProfileRepository, FixedClock>;

struct Harness {
    repository: Arc<InMemoryProfileRepository>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let repository = Arc::new(InMemoryProfileRepository::new());
    let service = ProfileService::new(
        Arc::clone(&repository),
        Arc::new(FixedClock::on(2026, 4, 1)),
    );
    Harness {
        repository,
        service,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_or_create_is_idempotent(harness: Harness) -> eyre::Result<()> {
    let user = UserId::new();

    let first = harness.service.get_or_create(user).await?;
    let second = harness.service.get_or_create(user).await?;

    assert_eq!(first, second);
    assert_eq!(first.avatar(), None);
    assert_eq!(harness.repository.find(user).await?, Some(first));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn set_avatar_creates_profile_when_missing(harness: Harness) -> eyre::Result<()> {
    let user = UserId::new();

    let profile = harness.service.set_avatar(user, "me.png").await?;

    let expected = format!("avatars/user_{user}/me.png");
    assert_eq!(profile.avatar().map(|path| path.as_str()), Some(expected.as_str()));
    let stored = harness.repository.find(user).await?;
    assert_eq!(stored, Some(profile));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_filename_leaves_profile_untouched(harness: Harness) -> eyre::Result<()> {
    let user = UserId::new();

    let result = harness.service.set_avatar(user, "../secret").await;

    assert!(matches!(result, Err(ProfileServiceError::Domain(_))));
    assert_eq!(harness.repository.find(user).await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clear_avatar_returns_removed_path(harness: Harness) -> eyre::Result<()> {
    let user = UserId::new();
    harness.service.set_avatar(user, "old.png").await?;

    let cleared = harness.service.clear_avatar(user).await?;
    let again = harness.service.clear_avatar(user).await?;

    let expected = format!("avatars/user_{user}/old.png");
    assert_eq!(cleared.map(|path| path.as_str().to_owned()), Some(expected));
    assert_eq!(again, None);
    let stored = harness.service.get_or_create(user).await?;
    assert_eq!(stored.avatar(), None);
    Ok(())
}
