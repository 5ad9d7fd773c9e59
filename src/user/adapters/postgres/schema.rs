//! Diesel schema for the externally owned user table.

diesel::table! {
    /// Users managed by the authentication collaborator.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 150]
        username -> Varchar,
    }
}
