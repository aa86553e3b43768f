//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use cakeshop_core::error::{AppError, ErrorKind};
use cakeshop_core::result::AppResult;
use cakeshop_entity::user::User;

use crate::store::UserStore;

/// PostgreSQL-backed user store.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_subject(&self, subject: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE subject = $1")
            .bind(subject)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by subject", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn insert(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, subject, email, display_name, username, contact_number, \
             country, notify_email, newsletter, is_active, last_login_at, \
             failed_login_attempts, locked_until, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.subject)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.username)
        .bind(&user.contact_number)
        .bind(&user.country)
        .bind(user.notify_email)
        .bind(user.newsletter)
        .bind(user.is_active)
        .bind(user.last_login_at)
        .bind(user.failed_login_attempts)
        .bind(user.locked_until)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert user", e))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET email = $2, display_name = $3, username = $4, \
             contact_number = $5, country = $6, notify_email = $7, newsletter = $8, \
             is_active = $9, last_login_at = $10, failed_login_attempts = $11, \
             locked_until = $12, updated_at = $13 \
             WHERE id = $1 RETURNING *",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.username)
        .bind(&user.contact_number)
        .bind(&user.country)
        .bind(user.notify_email)
        .bind(user.newsletter)
        .bind(user.is_active)
        .bind(user.last_login_at)
        .bind(user.failed_login_attempts)
        .bind(user.locked_until)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))
    }
}
