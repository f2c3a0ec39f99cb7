use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Publication state of a content record, mirrored by the `content_status`
/// database enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "content_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentStatus {
    Draft,
    Published,
}

/// Content row joined with its category title and author display name
#[derive(Debug, Clone, FromRow)]
pub struct ContentRecord {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub description: String,
    pub image: String,
    /// Comma-joined tag list, exactly as stored
    pub tags: String,
    pub status: ContentStatus,
    pub category_id: i64,
    pub category_name: String,
    pub created_by_id: i64,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set written on insert and update
#[derive(Debug, Clone, PartialEq)]
pub struct NewContent {
    pub title: String,
    pub excerpt: String,
    pub description: String,
    pub image: String,
    pub tags: String,
    pub status: ContentStatus,
    pub category_id: i64,
    pub created_by_id: i64,
}

/// Splits the stored comma-joined form into a tag list.
///
/// Tags are stored exactly as submitted, so this performs no trimming or
/// deduplication. An empty stored string comes back as `[""]` rather
/// than `[]`.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',').map(str::to_string).collect()
}
