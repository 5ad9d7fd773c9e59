//! Diesel schema for notification persistence.

diesel::table! {
    /// Append-only notification rows, one per recipient.
    notifications (id) {
        /// Store-assigned sequence identifier.
        id -> Int8,
        /// Recipient user identifier.
        user_id -> Uuid,
        /// Rendered message text.
        #[max_length = 500]
        message -> Varchar,
        /// Whether the recipient has seen the notification.
        is_read -> Bool,
        /// Linked task, removed with the task.
        task_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
