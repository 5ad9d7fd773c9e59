//! In-memory profile storage.

mod repository;

pub use repository::InMemoryProfileRepository;
