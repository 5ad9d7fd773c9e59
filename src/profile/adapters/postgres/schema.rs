//! Diesel schema for profile persistence.

diesel::table! {
    /// One profile row per user.
    profiles (user_id) {
        /// Owning user.
        user_id -> Uuid,
        /// Relative avatar storage path.
        #[max_length = 255]
        avatar -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
