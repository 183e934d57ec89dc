//! In-memory stand-in for the external `users` table.

use super::UserId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Profile fields consumed by read paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// First name shown as the author display name.
    pub first_name: String,
}

/// Shared, thread-safe user directory used by the in-memory adapters.
///
/// Clones share the same underlying map, so one directory can back both
/// the task and comment repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user and returns their identifier.
    pub fn register(&self, first_name: impl Into<String>) -> UserId {
        let id = UserId::new();
        let profile = UserProfile {
            id,
            first_name: first_name.into(),
        };
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, profile);
        id
    }

    /// Looks up a registered user.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<UserProfile> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Returns `true` when the user is registered.
    #[must_use]
    pub fn contains(&self, id: UserId) -> bool {
        self.find(id).is_some()
    }
}
