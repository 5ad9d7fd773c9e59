//! Domain model for user notifications.

mod error;
mod notification;
mod relative_time;

pub use error::NotificationDomainError;
pub use notification::{
    Notification, NotificationDraft, NotificationId, NotificationMessage, PersistedNotificationData,
};
pub use relative_time::humanize_elapsed;
