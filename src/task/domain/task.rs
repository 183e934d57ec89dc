//! Task aggregate and the values used to create it.

use super::{GeoPoint, Money, TaskDomainError, TaskId};
use crate::user::UserId;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of work a task asks for, such as `cleaning` or `delivery`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskType(String);

impl TaskType {
    /// Creates a validated task type.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskType`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskType);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the task type as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a task takes place: a free-text label and its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLocation {
    label: String,
    point: GeoPoint,
}

impl TaskLocation {
    /// Creates a location from a label and a validated point.
    #[must_use]
    pub fn new(label: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            label: label.into(),
            point,
        }
    }

    /// Returns the free-text location label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the coordinates.
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        self.point
    }
}

/// Caller-supplied task content before it is posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    task_type: TaskType,
    title: String,
    description: String,
    must_haves: String,
    amount: Money,
    location: TaskLocation,
}

impl TaskDraft {
    /// Creates a draft with the required task fields.
    ///
    /// Description and requirements default to empty text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn new(
        task_type: TaskType,
        title: impl Into<String>,
        amount: Money,
        location: TaskLocation,
    ) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let trimmed_title = raw_title.trim();
        if trimmed_title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            task_type,
            title: trimmed_title.to_owned(),
            description: String::new(),
            must_haves: String::new(),
            amount,
            location,
        })
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the free-text requirements.
    #[must_use]
    pub fn with_must_haves(mut self, must_haves: impl Into<String>) -> Self {
        self.must_haves = must_haves.into();
        self
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> &TaskType {
        &self.task_type
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the free-text requirements.
    #[must_use]
    pub fn must_haves(&self) -> &str {
        &self.must_haves
    }

    /// Returns the offered amount.
    #[must_use]
    pub const fn amount(&self) -> &Money {
        &self.amount
    }

    /// Returns the location.
    #[must_use]
    pub const fn location(&self) -> &TaskLocation {
        &self.location
    }
}

/// A task stamped with its owner and creation time, awaiting an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    owner: UserId,
    draft: TaskDraft,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Stamps a draft with its owner and the current clock time.
    ///
    /// The timestamp is truncated to microseconds, the precision of the
    /// `created_date` column.
    #[must_use]
    pub fn new(owner: UserId, draft: TaskDraft, clock: &impl Clock) -> Self {
        Self {
            owner,
            draft,
            created_at: clock.utc().trunc_subsecs(6),
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the draft content.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Returns the server-assigned creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completes creation with the identifier the store generated.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            owner: self.owner,
            draft: self.draft,
            created_at: self.created_at,
        }
    }
}

/// Posted task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    #[serde(flatten)]
    draft: TaskDraft,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning user.
    pub owner: UserId,
    /// Persisted task content.
    pub draft: TaskDraft,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            draft: data.draft,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the task content.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> &TaskType {
        self.draft.task_type()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.draft.title()
    }

    /// Returns the offered amount.
    #[must_use]
    pub const fn amount(&self) -> &Money {
        self.draft.amount()
    }

    /// Returns the location.
    #[must_use]
    pub const fn location(&self) -> &TaskLocation {
        self.draft.location()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
