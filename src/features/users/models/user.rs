use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a user account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Bcrypt hash, never serialized out
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
