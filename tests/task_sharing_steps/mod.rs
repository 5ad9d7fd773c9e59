//! Step definitions for task sharing scenarios.

mod given;
mod then;
mod when;
pub mod world;
