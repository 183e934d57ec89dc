//! Repository port for posting and reading task comments.

use crate::comment::domain::{Comment, CommentId, CommentRecord, NewComment};
use crate::task::domain::TaskId;
use crate::user::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Inserts a comment or reply and returns it with its generated
    /// identifier.
    ///
    /// Replies are only stored when the parent exists on the same task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::ParentNotFound`] for a reply whose
    /// parent is missing or belongs to another task, and
    /// [`CommentRepositoryError::MissingGeneratedId`] when a top-level insert
    /// yields no identifier.
    async fn insert(&self, comment: NewComment) -> CommentRepositoryResult<Comment>;

    /// Returns every comment on `task_id` with its author's first name,
    /// oldest first.
    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<CommentRecord>>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// The insert completed without producing a comment identifier.
    #[error("comment insert produced no identifier")]
    MissingGeneratedId,

    /// The parent comment does not exist on the comment's task.
    #[error("parent comment not found on task: {0}")]
    ParentNotFound(CommentId),

    /// The task does not exist.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The authoring user does not exist.
    #[error("unknown comment author: {0}")]
    UnknownAuthor(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
