//! Application services for posting, fetching, and searching tasks.

mod listing;

pub use listing::{TaskListingService, TaskQueryBuilder, TaskServiceError, TaskServiceResult};
