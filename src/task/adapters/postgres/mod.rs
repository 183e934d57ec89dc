//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;
mod search;

pub use repository::{PostgresTaskRepository, TaskPgPool};
