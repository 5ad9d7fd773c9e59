//! Port contracts for notification storage and live delivery.

mod repository;
mod subscriber;

pub use repository::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult};
pub use subscriber::{NotificationSubscriber, NotificationSubscriberError};
