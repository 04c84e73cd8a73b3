//! Credential store: user persistence operations
//!
//! `UserStore` is the port the auth service and the operational tooling
//! work against; `UserRepository` is the PostgreSQL implementation.
//! Uniqueness of email and username is enforced by the store's unique
//! indexes, so concurrent registrations cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, User};

/// Error type for credential store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the row (email or username already taken).
    #[error("user already registered")]
    Duplicate,

    /// Any other persistence failure.
    #[error("credential store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            // unique_violation
            if db.code().as_deref() == Some("23505") {
                return StoreError::Duplicate;
            }
        }
        StoreError::Unavailable(e)
    }
}

/// Port over the credential store.
///
/// Implemented by [`UserRepository`] in production and by in-memory
/// doubles in tests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user with the default role.
    ///
    /// # Errors
    /// * `Duplicate` - email or username already registered
    async fn create(&self, new_user: &NewUser) -> Result<User, StoreError>;

    /// Look up a user where the identifier matches either the email or
    /// the username (single query, logical OR over both fields).
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Stamp the last-login timestamp and return the stored value.
    async fn record_login(&self, user_id: Uuid) -> Result<DateTime<Utc>, StoreError>;

    /// Administrative bulk clear; returns how many rows were removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// List every user record.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;
}

/// User repository backed by PostgreSQL
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, StoreError> {
        info!("Creating new user: {}", new_user.username);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, role, last_login, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, last_login, created_at, updated_at
            FROM users
            WHERE email = $1 OR username = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, last_login, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn record_login(&self, user_id: Uuid) -> Result<DateTime<Utc>, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET last_login = now(), updated_at = now()
            WHERE id = $1
            RETURNING last_login
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("last_login"))
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;

        info!("Cleared {} user records", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, last_login, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
