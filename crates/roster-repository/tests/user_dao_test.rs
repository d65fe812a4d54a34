//! Integration tests for `PgUserDao` and the repository variants.
//!
//! These tests run against a real PostgreSQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use roster_core::{NewUser, RosterError, UserId};
use roster_repository::{PgUserDao, UserDao, UserRepository, UserRepositoryImpl};
use std::sync::Arc;

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser::new(Some(name.to_string()), Some(email.to_string()), Some("secret".to_string()))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_by_id() {
    let db = TestDatabase::new().await;
    let dao = PgUserDao::new(db.pool());

    let created = dao.create(&new_user("Alice", "a@x.com")).await.expect("Failed to create user");
    assert_eq!(created.id, UserId::new(1));
    assert_eq!(created.name.as_deref(), Some("Alice"));
    assert_eq!(created.email.as_deref(), Some("a@x.com"));

    let found = dao.find_by_id(created.id).await.expect("Failed to find user");
    assert_eq!(found, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_never_created_is_not_found() {
    let db = TestDatabase::new().await;
    let dao = PgUserDao::new(db.pool());

    let result = dao.find_by_id(UserId::new(42)).await;
    assert!(matches!(result, Err(RosterError::NotFound { .. })));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_replaces_fields_and_bumps_updated_at() {
    let db = TestDatabase::new().await;
    let dao = PgUserDao::new(db.pool());

    let mut user = dao.create(&new_user("Alice", "a@x.com")).await.unwrap();
    user.name = Some("Alicia".to_string());
    user.password = None;

    let updated = dao.update(&user).await.expect("Failed to update user");
    assert_eq!(updated.name.as_deref(), Some("Alicia"));
    assert_eq!(updated.email.as_deref(), Some("a@x.com"));
    assert!(updated.password.is_none());
    assert_eq!(updated.created_at, user.created_at);
    assert!(updated.updated_at >= user.updated_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_nonexistent_is_not_found() {
    let db = TestDatabase::new().await;
    let dao = PgUserDao::new(db.pool());

    let mut ghost = dao.create(&new_user("Alice", "a@x.com")).await.unwrap();
    ghost.id = UserId::new(2);

    let result = dao.update(&ghost).await;
    assert!(matches!(result, Err(RosterError::NotFound { .. })));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_soft_delete_hides_record() {
    let db = TestDatabase::new().await;
    let dao = PgUserDao::new(db.pool());

    let alice = dao.create(&new_user("Alice", "a@x.com")).await.unwrap();
    let bob = dao.create(&new_user("Bob", "b@x.com")).await.unwrap();

    dao.delete(alice.id).await.expect("Failed to delete user");

    assert!(dao.find_by_id(alice.id).await.unwrap_err().is_not_found());
    assert!(dao.delete(alice.id).await.unwrap_err().is_not_found());

    let mut stale = alice.clone();
    stale.name = Some("Zombie".to_string());
    assert!(dao.update(&stale).await.unwrap_err().is_not_found());

    let all = dao.find_all().await.unwrap();
    assert_eq!(all, vec![bob]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_in_insertion_order() {
    let db = TestDatabase::new().await;
    let dao = PgUserDao::new(db.pool());

    for (name, email) in [("A", "a@x.com"), ("B", "b@x.com"), ("C", "c@x.com")] {
        dao.create(&new_user(name, email)).await.unwrap();
    }

    let names: Vec<_> = dao
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.name.unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_plain_repository_over_postgres() {
    let db = TestDatabase::new().await;
    let repo = UserRepositoryImpl::new(Arc::new(PgUserDao::new(db.pool())));

    let created = repo.create(&new_user("Alice", "a@x.com")).await.unwrap();
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), created);

    repo.delete(created.id).await.unwrap();
    assert!(repo.find_by_id(created.id).await.unwrap_err().is_not_found());
    assert!(repo.find_all().await.unwrap().is_empty());
}
