//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// URL slug, unique through `idx_tasks_slug_unique`.
        #[max_length = 250]
        slug -> Nullable<Varchar>,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Workflow status code.
        #[max_length = 20]
        status -> Varchar,
        /// Priority code.
        #[max_length = 10]
        priority -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Creating user.
        creator_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp, set only while completed.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Collaborators assigned to a task.
    task_assignees (task_id, user_id) {
        /// Task identifier.
        task_id -> Uuid,
        /// Assigned user identifier.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Immutable comments on tasks.
    task_comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        task_id -> Uuid,
        /// Author identifier.
        user_id -> Uuid,
        /// Comment body.
        text -> Text,
        /// Posting timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(task_assignees -> tasks (task_id));
diesel::joinable!(task_comments -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_assignees, task_comments);
