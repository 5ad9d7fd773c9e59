//! Shared tasks: identity, access rules, lifecycle and dashboards.
//!
//! A task is owned by its creator and shared with collaborators. The
//! creator may change anything, collaborators may only move the status, and
//! everyone else cannot see the task at all. Slugs are derived from the
//! title once and never regenerated. Assignment and status changes raise
//! notifications that commit together with the task write. The module
//! follows hexagonal architecture:
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
