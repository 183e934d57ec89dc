//! Diesel schema for the external `users` table.
//!
//! Only the columns read by this crate are declared.

diesel::table! {
    /// Marketplace users, owned outside this crate.
    users (oid) {
        /// User identifier.
        oid -> Uuid,
        /// First name shown as the author display name.
        first_name -> Text,
    }
}
