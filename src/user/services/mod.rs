//! Application services for user lookup.

mod search;

pub use search::{UserSearchConfig, UserSearchError, UserSearchService};
