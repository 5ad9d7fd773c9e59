//! Unit tests for user identity types and search.

mod search_tests;
