//! Session-related types.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the logged-in user's id. The role is not cached here; it is
    /// re-read from the database on every request.
    pub const USER_ID: &str = "user_id";
}
