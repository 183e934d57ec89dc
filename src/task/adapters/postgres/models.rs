//! Diesel row models for task persistence.

use super::schema::task;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = task)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Generated task identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub task_id: i64,
    /// Category of work.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub task_type: String,
    /// Owning user.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub user_id: uuid::Uuid,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    /// Task description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Free-text requirements.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub must_haves: String,
    /// Amount in minor units.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub amount: i64,
    /// Three-letter currency code.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub currency: String,
    /// Free-text location label.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub locationstr: String,
    /// Latitude in degrees.
    #[diesel(sql_type = diesel::sql_types::Double)]
    pub lat: f64,
    /// Longitude in degrees.
    #[diesel(sql_type = diesel::sql_types::Double)]
    pub long: f64,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_date: DateTime<Utc>,
}

/// Search result row: a task plus its computed distance.
#[derive(Debug, Clone, QueryableByName)]
pub struct NearbyTaskRow {
    /// Task columns.
    #[diesel(embed)]
    pub task: TaskRow,
    /// Great-circle distance from the search origin in miles.
    #[diesel(sql_type = diesel::sql_types::Double)]
    pub distance: f64,
}

/// Identifier extracted from the insert statement.
#[derive(Debug, Clone, QueryableByName)]
pub struct GeneratedTaskId {
    /// Generated task identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub task_id: i64,
}
