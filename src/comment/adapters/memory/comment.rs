//! In-memory repository for comment tests and local tooling.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::comment::{
    domain::{Comment, CommentId, CommentRecord, NewComment},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskId, ports::TaskRepository,
};
use crate::user::InMemoryUserDirectory;

/// Thread-safe in-memory comment repository.
///
/// Task and author references are checked against the supplied task
/// repository and user directory, mirroring the foreign keys of the
/// `comments` table.
#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<InMemoryCommentState>>,
    users: InMemoryUserDirectory,
    tasks: InMemoryTaskRepository,
}

#[derive(Debug, Default)]
struct InMemoryCommentState {
    comments: BTreeMap<CommentId, Comment>,
    last_id: i64,
}

impl InMemoryCommentRepository {
    /// Creates an empty repository bound to `users` and `tasks`.
    #[must_use]
    pub fn new(users: InMemoryUserDirectory, tasks: InMemoryTaskRepository) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryCommentState::default())),
            users,
            tasks,
        }
    }

    async fn ensure_task_exists(&self, task_id: TaskId) -> CommentRepositoryResult<()> {
        let found = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(CommentRepositoryError::persistence)?;
        if found.is_none() {
            return Err(CommentRepositoryError::UnknownTask(task_id));
        }
        Ok(())
    }

    /// Replies are only accepted when the parent exists on the same task.
    /// Comments are never removed, so the check holds until the insert.
    fn ensure_parent_on_task(
        &self,
        parent_id: CommentId,
        task_id: TaskId,
    ) -> CommentRepositoryResult<()> {
        let state = self.state.read().map_err(lock_error)?;
        let parent_on_task = state
            .comments
            .get(&parent_id)
            .is_some_and(|parent| parent.task_id() == task_id);
        if parent_on_task {
            Ok(())
        } else {
            Err(CommentRepositoryError::ParentNotFound(parent_id))
        }
    }
}

fn lock_error(err: impl ToString) -> CommentRepositoryError {
    CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: NewComment) -> CommentRepositoryResult<Comment> {
        if let Some(parent_id) = comment.parent() {
            self.ensure_parent_on_task(parent_id, comment.task_id())?;
        }
        if !self.users.contains(comment.author()) {
            return Err(CommentRepositoryError::UnknownAuthor(comment.author()));
        }
        self.ensure_task_exists(comment.task_id()).await?;

        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state
            .last_id
            .checked_add(1)
            .ok_or(CommentRepositoryError::MissingGeneratedId)?;
        state.last_id = next_id;

        let created = comment.into_comment(CommentId::new(next_id));
        state.comments.insert(created.id(), created.clone());
        Ok(created)
    }

    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<CommentRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut records: Vec<CommentRecord> = state
            .comments
            .values()
            .filter(|comment| comment.task_id() == task_id)
            .filter_map(|comment| {
                self.users.find(comment.author()).map(|author| CommentRecord {
                    id: comment.id(),
                    parent_id: comment.parent(),
                    author_name: author.first_name,
                    message: comment.message().as_str().to_owned(),
                    created_at: comment.created_at(),
                })
            })
            .collect();
        records.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(records)
    }
}
