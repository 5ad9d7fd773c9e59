//! User profiles holding an avatar reference.
//!
//! A profile exists at most once per user and is created explicitly through
//! [`services::ProfileService::get_or_create`] the first time the web layer
//! needs it. Avatar files live outside this crate; only their storage path
//! is recorded.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
