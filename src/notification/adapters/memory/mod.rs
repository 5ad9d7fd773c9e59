//! In-memory notification storage.

mod repository;

pub use repository::InMemoryNotificationRepository;
