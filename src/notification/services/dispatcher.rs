//! Builds notification drafts for task lifecycle events.

use super::NotificationConfig;
use crate::notification::{
    domain::{NotificationDraft, NotificationMessage},
    ports::NotificationSubscriber,
};
use crate::task::domain::Task;
use crate::user::domain::UserId;
use minijinja::Environment;
use mockable::Clock;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Turns assignment and status-change events into notification drafts.
///
/// The dispatcher never fails the operation that triggered it. A template
/// that cannot be rendered falls back to the built-in wording, and a
/// subscriber that rejects a message is only logged.
#[derive(Clone, Default)]
pub struct NotificationDispatcher {
    config: NotificationConfig,
    subscribers: Vec<Arc<dyn NotificationSubscriber>>,
}

impl fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("config", &self.config)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl NotificationDispatcher {
    /// Creates a dispatcher with the given configuration.
    #[must_use]
    pub const fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber that receives every committed notification.
    #[must_use]
    pub fn with_subscriber(mut self, subscriber: Arc<dyn NotificationSubscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds the draft telling `assignee` they were added to `task`.
    #[must_use]
    pub fn assigned(
        &self,
        task: &Task,
        assignee: UserId,
        clock: &impl Clock,
    ) -> Option<NotificationDraft> {
        let message = self.render(&self.config.assigned_template, task, || {
            format!("You were assigned to task: {}", task.title())
        })?;
        Some(NotificationDraft::new(assignee, message, Some(task.id()), clock))
    }

    /// Builds one status-change draft for the creator and for each other
    /// assignee.
    #[must_use]
    pub fn status_changed(&self, task: &Task, clock: &impl Clock) -> Vec<NotificationDraft> {
        let Some(message) = self.render(&self.config.status_changed_template, task, || {
            format!(
                "Task \"{}\" status changed to {}.",
                task.title(),
                task.status().display_name()
            )
        }) else {
            return Vec::new();
        };

        task.status_watchers()
            .into_iter()
            .map(|recipient| NotificationDraft::new(recipient, message.clone(), Some(task.id()), clock))
            .collect()
    }

    /// Hands committed notifications to every subscriber.
    pub fn publish(&self, drafts: &[NotificationDraft]) {
        for draft in drafts {
            for subscriber in &self.subscribers {
                if let Err(err) = subscriber.deliver(draft) {
                    tracing::warn!(
                        error = %err,
                        recipient = %draft.recipient(),
                        "notification subscriber rejected message"
                    );
                }
            }
        }
    }

    fn render(
        &self,
        template: &str,
        task: &Task,
        fallback: impl FnOnce() -> String,
    ) -> Option<NotificationMessage> {
        let rendered = Environment::new()
            .render_str(template, build_template_context(task))
            .map_err(|err| err.to_string())
            .and_then(|text| NotificationMessage::new(text).map_err(|err| err.to_string()));
        match rendered {
            Ok(message) => Some(message),
            Err(reason) => {
                tracing::warn!(
                    task_id = %task.id(),
                    reason = %reason,
                    "notification template failed, using default wording"
                );
                NotificationMessage::new(fallback()).ok()
            }
        }
    }
}

fn build_template_context(task: &Task) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("title".to_owned(), Value::String(task.title().to_string()));
    context.insert(
        "status".to_owned(),
        Value::String(task.status().display_name().to_owned()),
    );
    context.insert(
        "status_code".to_owned(),
        Value::String(task.status().as_str().to_owned()),
    );
    context
}
