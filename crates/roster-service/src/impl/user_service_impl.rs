//! User service implementation.

use crate::dto::{UserData, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{validation_errors_to_roster_error, RosterResult, UserId, ValidateExt};
use roster_repository::UserRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// User service component for Shaku DI.
///
/// Works against whichever [`UserRepository`] the module wires in, plain or
/// cached.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, data: UserData) -> RosterResult<UserResponse> {
        debug!("Creating user");

        data.validate_for_create()
            .map_err(validation_errors_to_roster_error)?;

        let created = self.user_repository.create(&data.into_new_user()).await?;

        info!(user_id = %created.id, "User created");
        Ok(UserResponse::from(created))
    }

    async fn update_user(&self, id: UserId, data: UserData) -> RosterResult<UserResponse> {
        debug!(user_id = %id, "Updating user");

        data.validate_request()?;

        let mut user = self.user_repository.find_by_id(id).await?;
        data.merge_into(&mut user);

        let updated = self.user_repository.update(&user).await?;

        info!(user_id = %id, "User updated");
        Ok(UserResponse::from(updated))
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<()> {
        debug!(user_id = %id, "Deleting user");

        self.user_repository.delete(id).await?;

        info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse> {
        debug!(user_id = %id, "Getting user");

        let user = self.user_repository.find_by_id(id).await?;
        Ok(UserResponse::from(user))
    }

    async fn list_users(&self) -> RosterResult<Vec<UserResponse>> {
        debug!("Listing users");

        let users = self.user_repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roster_core::{NewUser, Patch, RosterError, User};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock user repository for testing.
    struct MockUserRepository {
        users: Mutex<HashMap<UserId, User>>,
        updates: Mutex<Vec<User>>,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                updates: Mutex::new(Vec::new()),
            }
        }

        fn with_user(user: User) -> Self {
            let repo = Self::new();
            repo.users.lock().unwrap().insert(user.id, user);
            repo
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(&self, user: &NewUser) -> RosterResult<User> {
            let mut users = self.users.lock().unwrap();
            let now = Utc::now();
            let created = User {
                id: UserId::new(users.len() as u64 + 1),
                name: user.name.clone(),
                email: user.email.clone(),
                password: user.password.clone(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            };
            users.insert(created.id, created.clone());
            Ok(created)
        }

        async fn update(&self, user: &User) -> RosterResult<User> {
            self.updates.lock().unwrap().push(user.clone());
            let mut users = self.users.lock().unwrap();
            if !users.contains_key(&user.id) {
                return Err(RosterError::not_found("User", user.id));
            }
            users.insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: UserId) -> RosterResult<()> {
            self.users
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RosterError::not_found("User", id))
        }

        async fn find_by_id(&self, id: UserId) -> RosterResult<User> {
            self.users
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| RosterError::not_found("User", id))
        }

        async fn find_all(&self) -> RosterResult<Vec<User>> {
            let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
            users.sort_by_key(|u| u.id);
            Ok(users)
        }
    }

    fn create_test_user() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(1),
            name: Some("Alice".to_string()),
            email: Some("a@x.com".to_string()),
            password: Some("secret".to_string()),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn alice_data() -> UserData {
        UserData {
            name: Patch::Value("Alice".to_string()),
            email: Patch::Value("a@x.com".to_string()),
            password: Patch::Value("secret".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let repo = Arc::new(MockUserRepository::new());
        let service = UserServiceImpl::new(repo.clone());

        let response = service.create_user(alice_data()).await.unwrap();

        assert_eq!(response.id, UserId::new(1));
        assert_eq!(response.name.as_deref(), Some("Alice"));
        let stored = repo.find_by_id(UserId::new(1)).await.unwrap();
        assert_eq!(stored.password.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_create_user_missing_email() {
        let repo = Arc::new(MockUserRepository::new());
        let service = UserServiceImpl::new(repo.clone());

        let data = UserData {
            email: Patch::Null,
            ..alice_data()
        };
        let result = service.create_user(data).await;

        assert!(matches!(result, Err(RosterError::Validation(_))));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_user_invalid_email() {
        let service = UserServiceImpl::new(Arc::new(MockUserRepository::new()));

        let data = UserData {
            email: Patch::Value("nope".to_string()),
            ..alice_data()
        };

        assert!(matches!(
            service.create_user(data).await,
            Err(RosterError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let user = create_test_user();
        let service = UserServiceImpl::new(Arc::new(MockUserRepository::with_user(user.clone())));

        let response = service.get_user(user.id).await.unwrap();
        assert_eq!(response, UserResponse::from(user));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let service = UserServiceImpl::new(Arc::new(MockUserRepository::new()));

        let result = service.get_user(UserId::new(2)).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_user_merges_patch() {
        let repo = Arc::new(MockUserRepository::with_user(create_test_user()));
        let service = UserServiceImpl::new(repo.clone());

        let data = UserData {
            name: Patch::Value("Alicia".to_string()),
            email: Patch::Absent,
            password: Patch::Null,
        };
        let response = service.update_user(UserId::new(1), data).await.unwrap();

        assert_eq!(response.name.as_deref(), Some("Alicia"));
        assert_eq!(response.email.as_deref(), Some("a@x.com"));
        let stored = repo.find_by_id(UserId::new(1)).await.unwrap();
        assert!(stored.password.is_none());
    }

    #[tokio::test]
    async fn test_update_user_not_found_skips_write() {
        let repo = Arc::new(MockUserRepository::new());
        let service = UserServiceImpl::new(repo.clone());

        let result = service.update_user(UserId::new(2), alice_data()).await;

        assert!(result.unwrap_err().is_not_found());
        assert!(repo.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_user_rejects_invalid_field() {
        let repo = Arc::new(MockUserRepository::with_user(create_test_user()));
        let service = UserServiceImpl::new(repo.clone());

        let data = UserData {
            email: Patch::Value("bad".to_string()),
            ..UserData::default()
        };

        assert!(matches!(
            service.update_user(UserId::new(1), data).await,
            Err(RosterError::Validation(_))
        ));
        assert!(repo.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = Arc::new(MockUserRepository::with_user(create_test_user()));
        let service = UserServiceImpl::new(repo);

        service.delete_user(UserId::new(1)).await.unwrap();

        assert!(service.get_user(UserId::new(1)).await.unwrap_err().is_not_found());
        assert!(service.delete_user(UserId::new(1)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_users() {
        let service = UserServiceImpl::new(Arc::new(MockUserRepository::new()));
        service.create_user(alice_data()).await.unwrap();

        let data = UserData {
            name: Patch::Value("Bob".to_string()),
            email: Patch::Value("b@x.com".to_string()),
            password: Patch::Absent,
        };
        service.create_user(data).await.unwrap();

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name.as_deref(), Some("Alice"));
        assert_eq!(users[1].name.as_deref(), Some("Bob"));
    }
}
