//! In-memory adapters for comment persistence.

mod comment;

pub use comment::InMemoryCommentRepository;
