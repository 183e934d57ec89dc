//! Repository port for task creation, lookup, and geo-radius search.

use crate::task::domain::{NearbyTask, NewTask, Task, TaskId, TaskQuery};
use crate::user::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Each method issues a single round trip to the backing store.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task and returns it with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::MissingGeneratedId`] when the insert
    /// yields no identifier, or [`TaskRepositoryError::UnknownOwner`] when the
    /// owning user does not exist.
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns up to [`SEARCH_RESULT_LIMIT`](crate::task::domain::SEARCH_RESULT_LIMIT)
    /// tasks matching the query, nearest first.
    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<NearbyTask>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The insert completed without producing a task identifier.
    #[error("task insert produced no identifier")]
    MissingGeneratedId,

    /// The owning user does not exist.
    #[error("unknown task owner: {0}")]
    UnknownOwner(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
