//! References to marketplace users.
//!
//! Users live in the external `users` table and are never written by this
//! crate. Tasks and comments reference them by [`UserId`]; read paths join
//! them to surface author first names.

mod directory;
mod ids;
pub(crate) mod schema;

pub use directory::{InMemoryUserDirectory, UserProfile};
pub use ids::UserId;
