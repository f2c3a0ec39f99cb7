use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::users::models::User;

/// Persistence seam for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Stores a new password hash; returns the number of rows touched.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<u64>;

    /// First-or-create by email. Returns true when a row was inserted.
    async fn insert_if_absent(&self, name: &str, email: &str, password_hash: &str)
        -> Result<bool>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by id: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update password: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected())
    }

    async fn insert_if_absent(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert user: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
