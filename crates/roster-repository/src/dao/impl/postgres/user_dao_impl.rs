//! PostgreSQL implementation of [`UserDao`].
//!
//! [`UserDao`]: crate::dao::UserDao

use crate::{dao::UserDao, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_core::{NewUser, RosterError, RosterResult, User, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, error};

/// Columns selected for every user read.
const USER_COLUMNS: &str = "id, name, email, password, created_at, updated_at, deleted_at";

/// Row filter applied by every read and mutation; soft-deleted rows are
/// never visible through this DAO.
const NOT_DELETED: &str = "deleted_at IS NULL";

/// PostgreSQL-backed user DAO.
#[derive(Component, Clone)]
#[shaku(interface = UserDao)]
pub struct PgUserDao {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgUserDao {
    /// Creates a new PostgreSQL user DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = RosterError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id)
            .map_err(|e| RosterError::Internal(format!("Invalid user id in database: {}", e)))?;

        Ok(User {
            id: UserId::new(id),
            name: row.name,
            email: row.email,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

fn db_id(id: UserId) -> RosterResult<i64> {
    i64::try_from(id.into_inner())
        .map_err(|_| RosterError::validation(format!("User id out of range: {}", id)))
}

#[async_trait]
impl UserDao for PgUserDao {
    async fn create(&self, user: &NewUser) -> RosterResult<User> {
        let sql = format!(
            "INSERT INTO users (name, email, password, created_at, updated_at) \
             VALUES ($1, $2, $3, NOW(), NOW()) \
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create user in DB");
                RosterError::from(e)
            })?;

        let created = User::try_from(row)?;
        debug!(user_id = %created.id, "User was created in DB");
        Ok(created)
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, password = $4, updated_at = NOW() \
             WHERE id = $1 AND {NOT_DELETED} \
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(db_id(user.id)?)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_optional(self.pool.inner())
            .await
            .map_err(|e| {
                error!(user_id = %user.id, error = %e, "Failed to update user in DB");
                RosterError::from(e)
            })?
            .ok_or_else(|| RosterError::not_found("User", user.id))?;

        debug!(user_id = %user.id, "User was updated in DB");
        User::try_from(row)
    }

    async fn delete(&self, id: UserId) -> RosterResult<()> {
        let sql = format!("UPDATE users SET deleted_at = NOW() WHERE id = $1 AND {NOT_DELETED}");

        let result = sqlx::query(&sql)
            .bind(db_id(id)?)
            .execute(self.pool.inner())
            .await
            .map_err(|e| {
                error!(user_id = %id, error = %e, "Failed to delete user from DB");
                RosterError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RosterError::not_found("User", id));
        }

        debug!(user_id = %id, "User was deleted from DB");
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND {NOT_DELETED}");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(db_id(id)?)
            .fetch_optional(self.pool.inner())
            .await
            .map_err(|e| {
                error!(user_id = %id, error = %e, "Failed to get user from DB");
                RosterError::from(e)
            })?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        debug!(user_id = %id, "User was received from DB");
        User::try_from(row)
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {NOT_DELETED} ORDER BY id");

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(self.pool.inner())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to get users from DB");
                RosterError::from(e)
            })?;

        debug!(count = rows.len(), "Users were received from DB");
        rows.into_iter().map(User::try_from).collect()
    }
}

impl std::fmt::Debug for PgUserDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUserDao").finish_non_exhaustive()
    }
}
