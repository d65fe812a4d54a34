//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{Interface, NewUser, RosterResult, User, UserId};

/// User repository trait.
///
/// The service layer depends only on this interface; whether a cache sits in
/// front of the record store is decided at wiring time.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Persists a new user and returns the stored record.
    async fn create(&self, user: &NewUser) -> RosterResult<User>;

    /// Replaces the stored fields of an existing user.
    ///
    /// Returns `RosterError::NotFound` when no live record has `user.id`.
    async fn update(&self, user: &User) -> RosterResult<User>;

    /// Soft-deletes a user by ID.
    async fn delete(&self, id: UserId) -> RosterResult<()>;

    /// Finds a live user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<User>;

    /// Lists all live users ordered by ID.
    async fn find_all(&self) -> RosterResult<Vec<User>>;
}
