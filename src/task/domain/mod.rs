//! Domain model for marketplace tasks.
//!
//! Tasks are posted once and never updated here. The domain covers draft
//! validation, money and location value types, and the structured
//! predicates used by geo-radius search. Persistence stays outside the
//! domain boundary.

mod error;
mod geo;
mod ids;
mod money;
mod query;
mod task;

pub use error::TaskDomainError;
pub use geo::{EARTH_RADIUS_MILES, GeoPoint, SearchRadius};
pub use ids::TaskId;
pub use money::{CurrencyCode, Money};
pub use query::{
    NearbyTask, SEARCH_RESULT_LIMIT, TaskEquality, TaskPredicate, TaskQuery, TaskRange,
};
pub use task::{NewTask, PersistedTaskData, Task, TaskDraft, TaskLocation, TaskType};
