//! Notifications raised by task lifecycle events.
//!
//! Notifications are append-only rows delivered to one recipient each and
//! polled by the web layer. They are produced by the
//! [`services::NotificationDispatcher`] and committed by the task repository
//! in the same write as the task change that caused them. The module follows
//! hexagonal architecture:
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
