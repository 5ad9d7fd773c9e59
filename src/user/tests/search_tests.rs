//! Service tests for username autocomplete.

use std::sync::Arc;

use crate::user::{
    adapters::memory::InMemoryUserDirectory,
    domain::{UserId, UserRef, Username},
    services::{UserSearchConfig, UserSearchService},
};
use rstest::{fixture, rstest};

struct SearchContext {
    service: UserSearchService<InMemoryUserDirectory>,
    requester: UserId,
}

fn user(name: &str) -> UserRef {
    UserRef::new(UserId::new(), Username::new(name).expect("valid username"))
}

#[fixture]
fn context() -> SearchContext {
    let directory = InMemoryUserDirectory::new();
    let requester = user("alfred");
    directory.insert(requester.clone()).expect("insert user");
    for name in ["Alice", "albert", "bob", "Alina"] {
        directory.insert(user(name)).expect("insert user");
    }
    SearchContext {
        service: UserSearchService::new(Arc::new(directory)),
        requester: requester.id(),
    }
}

fn names(result: &[Username]) -> Vec<&str> {
    result.iter().map(Username::as_str).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_prefix_case_insensitively_and_excludes_requester(context: SearchContext) {
    let found = context
        .service
        .search(context.requester, "AL")
        .await
        .expect("search should succeed");

    assert_eq!(names(&found), vec!["Alice", "Alina", "albert"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_query_returns_nothing(context: SearchContext) {
    let found = context
        .service
        .search(context.requester, "   ")
        .await
        .expect("search should succeed");

    assert!(found.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_honours_configured_limit() {
    let directory = InMemoryUserDirectory::new();
    for index in 0..15 {
        directory
            .insert(user(&format!("user{index:02}")))
            .expect("insert user");
    }
    let service = UserSearchService::with_config(
        Arc::new(directory),
        UserSearchConfig { limit: 3 },
    );

    let found = service
        .search(UserId::new(), "user")
        .await
        .expect("search should succeed");

    assert_eq!(names(&found), vec!["user00", "user01", "user02"]);
}
