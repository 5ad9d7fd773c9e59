//! Tasktrack: shared task tracking with owner and collaborator roles.
//!
//! This crate holds the authorization and state-transition engine behind a
//! multi-user task tracker. Users create tasks, share them with
//! collaborators, move them through a fixed three-state workflow and receive
//! notifications when something they care about changes. Page rendering,
//! forms and login flows live in a separate web layer that calls into the
//! services exposed here.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and lookups
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//! - **Services**: Orchestration over ports with an injected clock
//!
//! # Modules
//!
//! - [`task`]: Slugs, access policy, lifecycle, comments and dashboards
//! - [`notification`]: Assignment and status-change notifications
//! - [`profile`]: Per-user profile records with avatar references
//! - [`user`]: Read-only view of the external user directory

pub mod notification;
pub mod profile;
pub mod task;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
