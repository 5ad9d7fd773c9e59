//! Notification configuration.

use serde::Deserialize;

/// Message templates and page sizes for notifications.
///
/// Templates are rendered with `minijinja`. Both receive `title`, `status`
/// (display name) and `status_code` in their context.
///
/// # Examples
///
/// ```
/// use tasktrack::notification::services::NotificationConfig;
///
/// let config = NotificationConfig::default();
/// assert_eq!(config.recent_limit, 10);
/// assert_eq!(config.inbox_limit, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Template for the message sent to a newly assigned user.
    pub assigned_template: String,
    /// Template for the message sent when a task changes status.
    pub status_changed_template: String,
    /// Maximum notifications returned by a recent-notifications poll.
    pub recent_limit: usize,
    /// Maximum notifications shown in the inbox listing.
    pub inbox_limit: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            assigned_template: "You were assigned to task: {{ title }}".to_owned(),
            status_changed_template: "Task \"{{ title }}\" status changed to {{ status }}."
                .to_owned(),
            recent_limit: 10,
            inbox_limit: 50,
        }
    }
}
