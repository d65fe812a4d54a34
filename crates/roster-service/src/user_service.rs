//! User service trait definition.

use crate::dto::{UserData, UserResponse};
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a new user. Name and email are required.
    async fn create_user(&self, data: UserData) -> RosterResult<UserResponse>;

    /// Applies a partial update to an existing user.
    async fn update_user(&self, id: UserId, data: UserData) -> RosterResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> RosterResult<()>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse>;

    /// Lists all users.
    async fn list_users(&self) -> RosterResult<Vec<UserResponse>>;
}
