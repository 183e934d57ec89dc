//! Shared world state for comment threading BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskmarket::comment::{
    adapters::memory::InMemoryCommentRepository,
    domain::{Comment, CommentThread},
    services::{CommentService, CommentServiceError},
};
use taskmarket::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskId, services::TaskListingService,
};
use taskmarket::user::{InMemoryUserDirectory, UserId};

/// Task service type used by the BDD world.
pub type TestTaskService = TaskListingService<InMemoryTaskRepository, DefaultClock>;

/// Comment service type used by the BDD world.
pub type TestCommentService = CommentService<InMemoryCommentRepository, DefaultClock>;

/// Scenario world for comment threading behaviour tests.
pub struct CommentWorld {
    pub tasks: TestTaskService,
    pub comments: TestCommentService,
    pub poster: UserId,
    pub helper: UserId,
    pub task_id: Option<TaskId>,
    pub second_task_id: Option<TaskId>,
    pub posted: Vec<Comment>,
    pub last_reply_result: Option<Result<Comment, CommentServiceError>>,
    pub threads: Option<Vec<CommentThread>>,
}

impl CommentWorld {
    /// Creates a world with a poster named Priya and a helper named Tomas.
    #[must_use]
    pub fn new() -> Self {
        let users = InMemoryUserDirectory::new();
        let poster = users.register("Priya");
        let helper = users.register("Tomas");
        let task_store = InMemoryTaskRepository::new(users.clone());
        let comment_store = InMemoryCommentRepository::new(users, task_store.clone());
        Self {
            tasks: TaskListingService::new(Arc::new(task_store), Arc::new(DefaultClock)),
            comments: CommentService::new(Arc::new(comment_store), Arc::new(DefaultClock)),
            poster,
            helper,
            task_id: None,
            second_task_id: None,
            posted: Vec::new(),
            last_reply_result: None,
            threads: None,
        }
    }

    /// Returns the first posted task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been posted yet.
    pub fn task(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing posted task in scenario world"))
    }

    /// Returns the comment posted at 1-based `position`.
    ///
    /// # Errors
    ///
    /// Returns an error when fewer comments were posted.
    pub fn comment_at(&self, position: usize) -> Result<&Comment, eyre::Report> {
        position
            .checked_sub(1)
            .and_then(|index| self.posted.get(index))
            .ok_or_else(|| eyre::eyre!("no comment at position {position}"))
    }

    /// Returns the thread at 1-based `position`.
    ///
    /// # Errors
    ///
    /// Returns an error when comments were not viewed or the thread is
    /// missing.
    pub fn thread_at(&self, position: usize) -> Result<&CommentThread, eyre::Report> {
        let threads = self
            .threads
            .as_ref()
            .ok_or_else(|| eyre::eyre!("comments have not been viewed"))?;
        position
            .checked_sub(1)
            .and_then(|index| threads.get(index))
            .ok_or_else(|| eyre::eyre!("no thread at position {position}"))
    }
}

impl Default for CommentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CommentWorld {
    CommentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
