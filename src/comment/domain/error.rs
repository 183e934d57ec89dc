//! Error types for comment validation.

use thiserror::Error;

/// Errors returned while constructing comment values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The message is empty after trimming.
    #[error("comment message must not be empty")]
    EmptyMessage,
}
