//! In-memory repository for task tests and local tooling.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NearbyTask, NewTask, SEARCH_RESULT_LIMIT, Task, TaskId, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::InMemoryUserDirectory;

/// Thread-safe in-memory task repository.
///
/// Identifiers are generated from a monotonically increasing counter, the
/// way an identity column would assign them.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
    users: InMemoryUserDirectory,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository whose owners are checked against `users`.
    #[must_use]
    pub fn new(users: InMemoryUserDirectory) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            users,
        }
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        if !self.users.contains(task.owner()) {
            return Err(TaskRepositoryError::UnknownOwner(task.owner()));
        }

        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state
            .last_id
            .checked_add(1)
            .ok_or(TaskRepositoryError::MissingGeneratedId)?;
        state.last_id = next_id;

        let created = task.into_task(TaskId::new(next_id));
        state.tasks.insert(created.id(), created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<NearbyTask>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matches: Vec<NearbyTask> = state
            .tasks
            .values()
            .filter_map(|task| {
                query.evaluate(task).map(|distance_miles| NearbyTask {
                    task: task.clone(),
                    distance_miles,
                })
            })
            .collect();
        matches.sort_by(|left, right| {
            left.distance_miles
                .total_cmp(&right.distance_miles)
                .then_with(|| left.task.id().cmp(&right.task.id()))
        });
        matches.truncate(SEARCH_RESULT_LIMIT);
        Ok(matches)
    }
}
