//! Diesel row models for comment persistence.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Comment row joined with its author's first name.
#[derive(Debug, Clone, Queryable)]
pub struct CommentRecordRow {
    /// Comment identifier.
    pub comment_id: i64,
    /// Parent comment for replies.
    pub parent_comment_id: Option<i64>,
    /// Author first name.
    pub first_name: String,
    /// Comment body.
    pub comment_text: String,
    /// Creation timestamp.
    pub created_date: DateTime<Utc>,
}

/// Identifier extracted from the insert statement.
#[derive(Debug, Clone, QueryableByName)]
pub struct GeneratedCommentId {
    /// Generated comment identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub comment_id: i64,
}
