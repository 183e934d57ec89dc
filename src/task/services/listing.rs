//! Service layer for task creation, lookup, and geo-radius search.

use crate::task::{
    domain::{
        GeoPoint, NearbyTask, NewTask, SearchRadius, Task, TaskDomainError, TaskDraft, TaskId,
        TaskPredicate, TaskQuery,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The operation is a declared contract point with no behaviour yet.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task listing orchestration service.
#[derive(Clone)]
pub struct TaskListingService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskListingService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task listing service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Posts a task on behalf of `owner`.
    ///
    /// The creation timestamp comes from the service clock; the identifier
    /// comes from the repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the insert fails or
    /// yields no identifier.
    #[instrument(skip(self, draft), fields(owner = %owner))]
    pub async fn create_task(&self, owner: UserId, draft: TaskDraft) -> TaskServiceResult<Task> {
        let new_task = NewTask::new(owner, draft, &*self.clock);
        let task = self.repository.insert(new_task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Fetches a task by identifier.
    ///
    /// Returns `Ok(None)` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn get_task(&self, task_id: TaskId) -> TaskServiceResult<Option<Task>> {
        let task = self.repository.find_by_id(task_id).await?;
        debug!(found = task.is_some(), "task lookup finished");
        Ok(task)
    }

    /// Starts a geo-radius search around `origin`.
    ///
    /// Tasks at exactly `radius` miles are excluded.
    #[must_use]
    pub fn search_near(&self, origin: GeoPoint, radius: SearchRadius) -> TaskQueryBuilder<'_, R> {
        TaskQueryBuilder {
            repository: self.repository.as_ref(),
            query: TaskQuery::near(origin, radius),
        }
    }

    /// Runs a prepared search.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the search fails.
    pub async fn find(&self, query: &TaskQuery) -> TaskServiceResult<Vec<NearbyTask>> {
        run_search(self.repository.as_ref(), query).await
    }

    /// Filtered task listing. Not implemented yet.
    ///
    /// # Errors
    ///
    /// Always returns [`TaskServiceError::Unimplemented`].
    #[expect(
        clippy::unused_async,
        reason = "async contract point for a listing that will query the repository"
    )]
    pub async fn list_tasks_with_filter(&self) -> TaskServiceResult<Vec<Task>> {
        Err(TaskServiceError::Unimplemented("list_tasks_with_filter"))
    }

    /// Task status transition. Not implemented yet.
    ///
    /// # Errors
    ///
    /// Always returns [`TaskServiceError::Unimplemented`].
    #[expect(
        clippy::unused_async,
        reason = "async contract point for a transition that will write to the repository"
    )]
    pub async fn change_task_status(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        debug!(task_id = %task_id, "status change requested");
        Err(TaskServiceError::Unimplemented("change_task_status"))
    }
}

/// Fluent builder that composes predicates onto a geo-radius search and
/// executes it.
pub struct TaskQueryBuilder<'r, R>
where
    R: TaskRepository,
{
    repository: &'r R,
    query: TaskQuery,
}

impl<R> TaskQueryBuilder<'_, R>
where
    R: TaskRepository,
{
    /// Adds a predicate that every returned task must satisfy.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<TaskPredicate>) -> Self {
        self.query = self.query.with_predicate(predicate);
        self
    }

    /// Returns the query composed so far.
    #[must_use]
    pub const fn query(&self) -> &TaskQuery {
        &self.query
    }

    /// Executes the search, nearest tasks first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the search fails.
    pub async fn find(self) -> TaskServiceResult<Vec<NearbyTask>> {
        run_search(self.repository, &self.query).await
    }
}

#[instrument(skip_all, fields(predicates = query.predicates().len()))]
async fn run_search<R>(repository: &R, query: &TaskQuery) -> TaskServiceResult<Vec<NearbyTask>>
where
    R: TaskRepository,
{
    let found = repository.search(query).await?;
    debug!(matches = found.len(), "task search finished");
    Ok(found)
}
