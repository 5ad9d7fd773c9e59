//! Adapter implementations for the notification repository port.

pub mod memory;
pub mod postgres;
