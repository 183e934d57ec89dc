//! One-level threaded read model for task comments.
//!
//! Storage returns a flat list of [`CommentRecord`]s for a task.
//! [`thread_comments`] groups every reply under its top-level ancestor, so a
//! reply to a reply is listed alongside the direct replies rather than
//! nested. Each comment appears exactly once.

use super::CommentId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Flat comment row joined with its author's first name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// Comment identifier.
    pub id: CommentId,
    /// Parent comment, `None` for top-level comments.
    pub parent_id: Option<CommentId>,
    /// Author first name.
    pub author_name: String,
    /// Comment body.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Reply listed under a top-level comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplySummary {
    /// Reply identifier.
    pub id: CommentId,
    /// Reply body.
    pub message: String,
    /// Reply author first name.
    pub author_name: String,
}

/// A top-level comment and its replies, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    /// Top-level comment identifier.
    pub id: CommentId,
    /// Top-level comment body.
    pub message: String,
    /// Top-level comment author first name.
    pub author_name: String,
    /// Creation timestamp of the top-level comment.
    pub created_at: DateTime<Utc>,
    /// Replies in creation order; empty when there are none.
    pub replies: Vec<ReplySummary>,
}

impl From<CommentRecord> for CommentThread {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            message: record.message,
            author_name: record.author_name,
            created_at: record.created_at,
            replies: Vec::new(),
        }
    }
}

impl From<CommentRecord> for ReplySummary {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            message: record.message,
            author_name: record.author_name,
        }
    }
}

/// Shapes a task's flat comment records into threads.
///
/// Threads are ordered by creation time, then identifier. Replies whose
/// ancestry cannot be resolved to a top-level comment in `records` are
/// dropped.
#[must_use]
pub fn thread_comments(records: Vec<CommentRecord>) -> Vec<CommentThread> {
    let parents: HashMap<CommentId, Option<CommentId>> = records
        .iter()
        .map(|record| (record.id, record.parent_id))
        .collect();

    let mut threads: BTreeMap<CommentId, CommentThread> = BTreeMap::new();
    let mut replies: Vec<(CommentId, CommentRecord)> = Vec::new();
    for record in records {
        match record.parent_id {
            None => {
                threads.insert(record.id, CommentThread::from(record));
            }
            Some(parent_id) => {
                if let Some(root) = resolve_root(&parents, parent_id) {
                    replies.push((root, record));
                }
            }
        }
    }

    replies.sort_by(|(_, left), (_, right)| {
        left.created_at
            .cmp(&right.created_at)
            .then_with(|| left.id.cmp(&right.id))
    });
    for (root, reply) in replies {
        if let Some(thread) = threads.get_mut(&root) {
            thread.replies.push(ReplySummary::from(reply));
        }
    }

    let mut ordered: Vec<CommentThread> = threads.into_values().collect();
    ordered.sort_by(|left, right| {
        left.created_at
            .cmp(&right.created_at)
            .then_with(|| left.id.cmp(&right.id))
    });
    ordered
}

/// Follows parent links from `start` to a comment without a parent.
///
/// Returns `None` for a missing ancestor or a cycle.
fn resolve_root(
    parents: &HashMap<CommentId, Option<CommentId>>,
    start: CommentId,
) -> Option<CommentId> {
    let mut current = start;
    for _ in 0..=parents.len() {
        match parents.get(&current)? {
            None => return Some(current),
            Some(next) => current = *next,
        }
    }
    None
}
