//! Domain model for task comments and their threaded read model.

mod comment;
mod error;
mod ids;
mod thread;

pub use comment::{Comment, CommentDraft, CommentText, NewComment};
pub use error::CommentDomainError;
pub use ids::CommentId;
pub use thread::{CommentRecord, CommentThread, ReplySummary, thread_comments};
