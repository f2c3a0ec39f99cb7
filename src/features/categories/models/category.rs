use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category row joined with its creator's display name
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRecord {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub created_by_id: i64,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
