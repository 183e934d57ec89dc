//! Diesel schema for comment persistence.

use crate::user::schema::users;

diesel::table! {
    /// Comments and replies on tasks.
    comments (comment_id) {
        /// Generated comment identifier.
        comment_id -> Int8,
        /// Parent comment for replies.
        parent_comment_id -> Nullable<Int8>,
        /// Authoring user.
        user_id -> Uuid,
        /// Owning task.
        task_id -> Int8,
        /// Comment body.
        comment_text -> Text,
        /// Creation timestamp.
        created_date -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(comments, users);
