use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::categories::models::CategoryRecord;

const RECORD_COLUMNS: &str = "c.id, c.title, c.slug, c.created_by_id, \
     u.name AS created_by_name, c.created_at, c.updated_at";

/// Persistence seam for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category, newest first.
    async fn list(&self) -> Result<Vec<CategoryRecord>>;

    /// A window of categories, newest first.
    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<CategoryRecord>>;

    async fn count(&self) -> Result<i64>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRecord>>;

    /// Existing slugs starting with `prefix`, for uniqueness resolution.
    async fn slugs_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Inserts a category; a slug collision surfaces as [`AppError::Conflict`].
    async fn insert(&self, title: &str, slug: &str, created_by_id: i64)
        -> Result<CategoryRecord>;

    /// Rewrites title and slug; returns the number of rows touched.
    async fn update(&self, id: i64, title: &str, slug: &str) -> Result<u64>;

    /// Deletes a category; returns the number of rows touched.
    async fn delete(&self, id: i64) -> Result<u64>;

    /// Number of contents still referencing the category.
    async fn contents_count(&self, category_id: i64) -> Result<i64>;
}

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self) -> Result<Vec<CategoryRecord>> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM categories c \
             JOIN users u ON u.id = c.created_by_id \
             ORDER BY c.created_at DESC"
        );

        sqlx::query_as::<_, CategoryRecord>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<CategoryRecord>> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM categories c \
             JOIN users u ON u.id = c.created_by_id \
             ORDER BY c.created_at DESC \
             LIMIT $1 OFFSET $2"
        );

        sqlx::query_as::<_, CategoryRecord>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list category page: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRecord>> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM categories c \
             JOIN users u ON u.id = c.created_by_id \
             WHERE c.id = $1"
        );

        sqlx::query_as::<_, CategoryRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch category: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn slugs_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        // Slugs are [a-z0-9-] only, so the prefix needs no LIKE escaping.
        sqlx::query_scalar::<_, String>("SELECT slug FROM categories WHERE slug LIKE $1 || '%'")
            .bind(prefix)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to scan slugs: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(
        &self,
        title: &str,
        slug: &str,
        created_by_id: i64,
    ) -> Result<CategoryRecord> {
        sqlx::query_as::<_, CategoryRecord>(
            "INSERT INTO categories (title, slug, created_by_id) VALUES ($1, $2, $3) \
             RETURNING id, title, slug, created_by_id, \
                 (SELECT name FROM users WHERE id = created_by_id) AS created_by_name, \
                 created_at, updated_at",
        )
        .bind(title)
        .bind(slug)
        .bind(created_by_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert category: {:?}", e);
            handle_db_error(e)
        })
    }

    async fn update(&self, id: i64, title: &str, slug: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE categories SET title = $2, slug = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(title)
        .bind(slug)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            handle_db_error(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                handle_db_error(e)
            })?;

        Ok(result.rows_affected())
    }

    async fn contents_count(&self, category_id: i64) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contents WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count category contents: {:?}", e);
                AppError::Database(e)
            })
    }
}
