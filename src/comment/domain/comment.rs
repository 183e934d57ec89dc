//! Comment entity and the values used to post one.

use super::{CommentDomainError, CommentId};
use crate::task::domain::TaskId;
use crate::user::UserId;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Non-empty comment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentText(String);

impl CommentText {
    /// Creates a validated comment body.
    ///
    /// Surrounding whitespace is kept; only blank messages are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyMessage`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CommentDomainError> {
        let text = value.into();
        if text.trim().is_empty() {
            return Err(CommentDomainError::EmptyMessage);
        }
        Ok(Self(text))
    }

    /// Returns the message as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caller-supplied comment content: the task it belongs to and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    task_id: TaskId,
    message: CommentText,
}

impl CommentDraft {
    /// Creates a draft for `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyMessage`] for blank messages.
    pub fn new(task_id: TaskId, message: impl Into<String>) -> Result<Self, CommentDomainError> {
        Ok(Self {
            task_id,
            message: CommentText::new(message)?,
        })
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the message.
    #[must_use]
    pub const fn message(&self) -> &CommentText {
        &self.message
    }
}

/// A comment stamped with author, parent, and creation time, awaiting an
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    author: UserId,
    parent: Option<CommentId>,
    draft: CommentDraft,
    created_at: DateTime<Utc>,
}

impl NewComment {
    /// Stamps a top-level comment with the current clock time, truncated to
    /// microseconds.
    #[must_use]
    pub fn top_level(author: UserId, draft: CommentDraft, clock: &impl Clock) -> Self {
        Self {
            author,
            parent: None,
            draft,
            created_at: clock.utc().trunc_subsecs(6),
        }
    }

    /// Stamps a reply to `parent` with the current clock time, truncated to
    /// microseconds.
    #[must_use]
    pub fn reply(
        author: UserId,
        parent: CommentId,
        draft: CommentDraft,
        clock: &impl Clock,
    ) -> Self {
        Self {
            author,
            parent: Some(parent),
            draft,
            created_at: clock.utc().trunc_subsecs(6),
        }
    }

    /// Returns the authoring user.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the parent comment for replies.
    #[must_use]
    pub const fn parent(&self) -> Option<CommentId> {
        self.parent
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.draft.task_id()
    }

    /// Returns the message.
    #[must_use]
    pub const fn message(&self) -> &CommentText {
        self.draft.message()
    }

    /// Returns the server-assigned creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completes creation with the identifier the store generated.
    #[must_use]
    pub fn into_comment(self, id: CommentId) -> Comment {
        Comment {
            id,
            task_id: self.draft.task_id,
            author: self.author,
            parent: self.parent,
            message: self.draft.message,
            created_at: self.created_at,
        }
    }
}

/// Posted comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author: UserId,
    parent: Option<CommentId>,
    message: CommentText,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the authoring user.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the parent comment, `None` for top-level comments.
    #[must_use]
    pub const fn parent(&self) -> Option<CommentId> {
        self.parent
    }

    /// Returns the message.
    #[must_use]
    pub const fn message(&self) -> &CommentText {
        &self.message
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
