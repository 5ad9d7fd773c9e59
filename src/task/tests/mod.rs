//! Unit tests for the task module.

mod access_tests;
mod repository_tests;
