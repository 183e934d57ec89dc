//! Diesel schema for task persistence.

use crate::user::schema::users;

diesel::table! {
    /// Posted marketplace tasks.
    task (task_id) {
        /// Generated task identifier.
        task_id -> Int8,
        /// Category of work.
        task_type -> Text,
        /// Owning user.
        user_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Free-text requirements.
        must_haves -> Text,
        /// Amount in minor units.
        amount -> Int8,
        /// Three-letter currency code.
        currency -> Text,
        /// Free-text location label.
        locationstr -> Text,
        /// Latitude in degrees.
        lat -> Float8,
        /// Longitude in degrees.
        long -> Float8,
        /// Creation timestamp.
        created_date -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(task, users);
