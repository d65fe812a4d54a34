//! Cache key generators for consistent key naming.

use roster_core::UserId;

/// Prefix for user snapshot keys.
pub const USER_KEY_PREFIX: &str = "user_";

/// Generate the cache key for a user by ID.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("{}{}", USER_KEY_PREFIX, id)
}
