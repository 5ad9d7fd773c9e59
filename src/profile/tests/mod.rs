//! Unit tests for the profile module.

mod service_tests;
