//! The record store adapter trait.
//!
//! Implementations talk directly to the authoritative store. Soft-deleted
//! rows are invisible to every operation.
//!
//! [`UserRepository`] implementations wrap a `UserDao`, optionally adding a
//! cache in front of it.
//!
//! [`UserRepository`]: crate::traits::UserRepository

use async_trait::async_trait;
use roster_core::{Interface, NewUser, RosterResult, User, UserId};

/// Low-level user data access object.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDao: Interface + Send + Sync {
    /// Inserts a new user and returns it with its assigned identifier.
    async fn create(&self, user: &NewUser) -> RosterResult<User>;

    /// Replaces the user-settable fields of an existing user.
    ///
    /// Fails with `NotFound` if the identifier is absent or soft-deleted.
    async fn update(&self, user: &User) -> RosterResult<User>;

    /// Soft-deletes a user by ID.
    ///
    /// Fails with `NotFound` if the identifier is absent or already deleted.
    async fn delete(&self, id: UserId) -> RosterResult<()>;

    /// Finds a live user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<User>;

    /// Returns every live user in identifier order.
    async fn find_all(&self) -> RosterResult<Vec<User>>;
}
