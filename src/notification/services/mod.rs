//! Notification services: event dispatch and inbox reads.

mod config;
mod dispatcher;
mod inbox;

pub use config::NotificationConfig;
pub use dispatcher::NotificationDispatcher;
pub use inbox::{NotificationService, NotificationServiceError, RecentNotification};
