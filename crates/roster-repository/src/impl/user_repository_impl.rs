//! Plain repository variant that talks to the record store directly.
//!
//! ```text
//! Service
//!   ↓ Arc<dyn UserRepository>
//! UserRepositoryImpl
//!   ↓ Arc<dyn UserDao>
//! PgUserDao
//!   ↓
//! PostgreSQL
//! ```

use crate::{dao::UserDao, traits::UserRepository};
use async_trait::async_trait;
use roster_core::{NewUser, RosterResult, User, UserId};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Repository implementation that forwards every call to [`UserDao`].
#[derive(Component)]
#[shaku(interface = UserRepository)]
pub struct UserRepositoryImpl {
    #[shaku(inject)]
    user_dao: Arc<dyn UserDao>,
}

impl UserRepositoryImpl {
    /// Creates a new `UserRepositoryImpl` with the given DAO.
    #[must_use]
    pub fn new(user_dao: Arc<dyn UserDao>) -> Self {
        Self { user_dao }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, user: &NewUser) -> RosterResult<User> {
        debug!("Repository: create user");
        self.user_dao.create(user).await
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        debug!("Repository: update user {}", user.id);
        self.user_dao.update(user).await
    }

    async fn delete(&self, id: UserId) -> RosterResult<()> {
        debug!("Repository: delete user {}", id);
        self.user_dao.delete(id).await
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<User> {
        debug!("Repository: find_by_id {}", id);
        self.user_dao.find_by_id(id).await
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        debug!("Repository: find_all");
        self.user_dao.find_all().await
    }
}

impl std::fmt::Debug for UserRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepositoryImpl").finish_non_exhaustive()
    }
}
