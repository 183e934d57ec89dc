//! Structured predicates for geo-radius task search.
//!
//! A [`TaskQuery`] always carries an origin and an exclusive radius. Extra
//! predicates narrow the result further; adapters either compile them into
//! parameterized SQL or evaluate them in process with [`TaskQuery::evaluate`].

use super::{CurrencyCode, GeoPoint, SearchRadius, Task, TaskDomainError, TaskType};
use crate::user::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum number of tasks a search returns.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Equality filters on task columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEquality {
    /// Task type equals the value.
    TaskType(TaskType),
    /// Currency equals the value.
    Currency(CurrencyCode),
    /// Owning user equals the value.
    Owner(UserId),
}

/// Inclusive range filters on task columns. Either bound may be open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRange {
    /// Amount in minor units.
    Amount {
        /// Lower bound, inclusive.
        min: Option<i64>,
        /// Upper bound, inclusive.
        max: Option<i64>,
    },
    /// Creation timestamp.
    CreatedAt {
        /// Lower bound, inclusive.
        from: Option<DateTime<Utc>>,
        /// Upper bound, inclusive.
        to: Option<DateTime<Utc>>,
    },
}

impl TaskRange {
    /// Creates an amount range.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvertedRange`] when `min > max`.
    pub fn amount(min: Option<i64>, max: Option<i64>) -> Result<Self, TaskDomainError> {
        ensure_ordered("amount", min.as_ref(), max.as_ref())?;
        Ok(Self::Amount { min, max })
    }

    /// Creates a creation-time range.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvertedRange`] when `from > to`.
    pub fn created_between(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self, TaskDomainError> {
        ensure_ordered("created_at", from.as_ref(), to.as_ref())?;
        Ok(Self::CreatedAt { from, to })
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Amount { min, max } => {
                within(task.amount().minor_units(), min.as_ref(), max.as_ref())
            }
            Self::CreatedAt { from, to } => within(task.created_at(), from.as_ref(), to.as_ref()),
        }
    }
}

fn ensure_ordered<T: PartialOrd>(
    field: &'static str,
    lower: Option<&T>,
    upper: Option<&T>,
) -> Result<(), TaskDomainError> {
    match (lower, upper) {
        (Some(low), Some(high)) if low > high => Err(TaskDomainError::InvertedRange { field }),
        _ => Ok(()),
    }
}

fn within<T: PartialOrd>(value: T, lower: Option<&T>, upper: Option<&T>) -> bool {
    lower.is_none_or(|low| &value >= low) && upper.is_none_or(|high| &value <= high)
}

/// A single search filter.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPredicate {
    /// Column equality.
    Equals(TaskEquality),
    /// Inclusive column range.
    Range(TaskRange),
    /// Task lies strictly within `radius` of `centre`.
    WithinRadius {
        /// Centre of the circle.
        centre: GeoPoint,
        /// Exclusive radius.
        radius: SearchRadius,
    },
}

impl TaskPredicate {
    /// Returns `true` when `task` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Equals(TaskEquality::TaskType(task_type)) => task.task_type() == task_type,
            Self::Equals(TaskEquality::Currency(currency)) => task.amount().currency() == currency,
            Self::Equals(TaskEquality::Owner(owner)) => task.owner() == *owner,
            Self::Range(range) => range.matches(task),
            Self::WithinRadius { centre, radius } => {
                radius.admits(centre.distance_miles(task.location().point()))
            }
        }
    }
}

impl From<TaskEquality> for TaskPredicate {
    fn from(value: TaskEquality) -> Self {
        Self::Equals(value)
    }
}

impl From<TaskRange> for TaskPredicate {
    fn from(value: TaskRange) -> Self {
        Self::Range(value)
    }
}

/// Geo-radius search with optional extra predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    origin: GeoPoint,
    radius: SearchRadius,
    predicates: Vec<TaskPredicate>,
}

impl TaskQuery {
    /// Starts a search for tasks strictly within `radius` of `origin`.
    #[must_use]
    pub const fn near(origin: GeoPoint, radius: SearchRadius) -> Self {
        Self {
            origin,
            radius,
            predicates: Vec::new(),
        }
    }

    /// Adds a predicate. All predicates must hold for a task to match.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<TaskPredicate>) -> Self {
        self.predicates.push(predicate.into());
        self
    }

    /// Returns the search origin.
    #[must_use]
    pub const fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Returns the exclusive search radius.
    #[must_use]
    pub const fn radius(&self) -> SearchRadius {
        self.radius
    }

    /// Returns the additional predicates in insertion order.
    #[must_use]
    pub fn predicates(&self) -> &[TaskPredicate] {
        &self.predicates
    }

    /// Returns the task's distance from the origin when it matches.
    #[must_use]
    pub fn evaluate(&self, task: &Task) -> Option<f64> {
        let distance = self.origin.distance_miles(task.location().point());
        let matches = self.radius.admits(distance)
            && self.predicates.iter().all(|predicate| predicate.matches(task));
        matches.then_some(distance)
    }
}

/// Search hit: a task and its distance from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyTask {
    /// Matching task.
    pub task: Task,
    /// Great-circle distance from the origin in miles.
    pub distance_miles: f64,
}
