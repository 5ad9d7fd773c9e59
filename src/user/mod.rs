//! External user identity as seen by the task core.
//!
//! Users are owned by the authentication collaborator. This module only
//! models the opaque handle the core receives (identifier plus username) and
//! the directory port used to resolve usernames for assignment and
//! autocomplete:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
