//! Application services for posting and reading task comments.

mod discussion;

pub use discussion::{CommentService, CommentServiceError, CommentServiceResult};
