//! Service layer for comments, replies, and threaded reads.

use crate::comment::{
    domain::{
        Comment, CommentDomainError, CommentDraft, CommentId, CommentThread, NewComment,
        thread_comments,
    },
    ports::{CommentRepository, CommentRepositoryError},
};
use crate::task::domain::TaskId;
use crate::user::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// Comment orchestration service.
#[derive(Clone)]
pub struct CommentService<R, C>
where
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CommentService<R, C>
where
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Posts a top-level comment on the draft's task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] when the task or author is
    /// unknown, or the insert fails or yields no identifier.
    #[instrument(skip(self, draft), fields(author = %author, task_id = %draft.task_id()))]
    pub async fn post_comment(
        &self,
        author: UserId,
        draft: CommentDraft,
    ) -> CommentServiceResult<Comment> {
        let comment = NewComment::top_level(author, draft, &*self.clock);
        let posted = self.repository.insert(comment).await?;
        info!(comment_id = %posted.id(), "comment posted");
        Ok(posted)
    }

    /// Posts a reply to `parent` on the draft's task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] wrapping
    /// [`CommentRepositoryError::ParentNotFound`] when `parent` does not
    /// exist on the same task.
    #[instrument(
        skip(self, draft),
        fields(author = %author, parent = %parent, task_id = %draft.task_id())
    )]
    pub async fn post_reply(
        &self,
        author: UserId,
        parent: CommentId,
        draft: CommentDraft,
    ) -> CommentServiceResult<Comment> {
        let reply = NewComment::reply(author, parent, draft, &*self.clock);
        let posted = self.repository.insert(reply).await?;
        info!(comment_id = %posted.id(), "reply posted");
        Ok(posted)
    }

    /// Returns the task's comments as threads, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] when the fetch fails.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn view_comments(&self, task_id: TaskId) -> CommentServiceResult<Vec<CommentThread>> {
        let records = self.repository.find_by_task(task_id).await?;
        let total = records.len();
        let threads = thread_comments(records);
        debug!(comments = total, threads = threads.len(), "comments threaded");
        Ok(threads)
    }
}
