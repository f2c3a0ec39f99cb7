use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::contents::dtos::ContentFilter;
use crate::features::contents::models::{ContentRecord, NewContent};

const RECORD_COLUMNS: &str = "c.id, c.title, c.excerpt, c.description, c.image, c.tags, \
     c.status, c.category_id, cat.title AS category_name, c.created_by_id, \
     u.name AS author, c.created_at, c.updated_at";

const RECORD_SOURCE: &str = "FROM contents c \
     JOIN categories cat ON cat.id = c.category_id \
     JOIN users u ON u.id = c.created_by_id";

/// Persistence seam for content records.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// A filtered window of contents plus the total row count the filters
    /// match before pagination.
    async fn list(&self, filter: &ContentFilter) -> Result<(Vec<ContentRecord>, i64)>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ContentRecord>>;

    /// Inserts a content record; a missing category or user surfaces as
    /// [`AppError::BadRequest`].
    async fn insert(&self, content: &NewContent) -> Result<ContentRecord>;

    /// Rewrites every mutable column; returns the number of rows touched.
    async fn update(&self, id: i64, content: &NewContent) -> Result<u64>;

    /// Deletes a content record; returns the number of rows touched.
    async fn delete(&self, id: i64) -> Result<u64>;
}

/// Builds the conjunctive WHERE clause for a filter, numbering placeholders
/// from `$1`. Returns the clause and the next free placeholder index; binds
/// must be applied in the same order the conditions are pushed.
fn build_where(filter: &ContentFilter) -> (String, usize) {
    let mut conditions = Vec::new();
    let mut next_arg = 1;

    if filter.search.is_some() {
        conditions.push(format!("c.title ILIKE ${next_arg}"));
        next_arg += 1;
    }

    if filter.status.is_some() {
        conditions.push(format!("c.status = ${next_arg}"));
        next_arg += 1;
    }

    if filter.category_id.is_some() {
        conditions.push(format!("c.category_id = ${next_arg}"));
        next_arg += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (clause, next_arg)
}

pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn list(&self, filter: &ContentFilter) -> Result<(Vec<ContentRecord>, i64)> {
        let (where_clause, next_arg) = build_where(filter);
        let search_pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        // Total count under the same predicates, without pagination.
        let count_query = format!("SELECT COUNT(*) FROM contents c {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = search_pattern {
            count = count.bind(pattern.clone());
        }
        if let Some(status) = filter.status {
            count = count.bind(status);
        }
        if let Some(category_id) = filter.category_id {
            count = count.bind(category_id);
        }

        let total = count.fetch_one(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to count contents: {:?}", e);
            AppError::Database(e)
        })?;

        let query = format!(
            "SELECT {RECORD_COLUMNS} {RECORD_SOURCE} {} \
             ORDER BY {} {} LIMIT ${} OFFSET ${}",
            where_clause,
            filter.order_by.as_sql(),
            filter.order_type.as_sql(),
            next_arg,
            next_arg + 1,
        );

        let mut rows = sqlx::query_as::<_, ContentRecord>(&query);
        if let Some(ref pattern) = search_pattern {
            rows = rows.bind(pattern.clone());
        }
        if let Some(status) = filter.status {
            rows = rows.bind(status);
        }
        if let Some(category_id) = filter.category_id {
            rows = rows.bind(category_id);
        }

        let records = rows
            .bind(filter.limit())
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list contents: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((records, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ContentRecord>> {
        let query = format!("SELECT {RECORD_COLUMNS} {RECORD_SOURCE} WHERE c.id = $1");

        sqlx::query_as::<_, ContentRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch content: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, content: &NewContent) -> Result<ContentRecord> {
        sqlx::query_as::<_, ContentRecord>(
            "INSERT INTO contents \
                 (title, excerpt, description, image, tags, status, category_id, created_by_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, title, excerpt, description, image, tags, status, category_id, \
                 (SELECT title FROM categories WHERE id = category_id) AS category_name, \
                 created_by_id, \
                 (SELECT name FROM users WHERE id = created_by_id) AS author, \
                 created_at, updated_at",
        )
        .bind(&content.title)
        .bind(&content.excerpt)
        .bind(&content.description)
        .bind(&content.image)
        .bind(&content.tags)
        .bind(content.status)
        .bind(content.category_id)
        .bind(content.created_by_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert content: {:?}", e);
            handle_db_error(e)
        })
    }

    async fn update(&self, id: i64, content: &NewContent) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE contents SET title = $2, excerpt = $3, description = $4, image = $5, \
                 tags = $6, status = $7, category_id = $8, created_by_id = $9, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&content.title)
        .bind(&content.excerpt)
        .bind(&content.description)
        .bind(&content.image)
        .bind(&content.tags)
        .bind(content.status)
        .bind(content.category_id)
        .bind(content.created_by_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update content: {:?}", e);
            handle_db_error(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete content: {:?}", e);
                handle_db_error(e)
            })?;

        Ok(result.rows_affected())
    }
}
