use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::repository::CategoryRepository;
use crate::shared::slug;
use crate::shared::types::PaginationMeta;

/// One re-resolve after a unique-slug race; a second collision bubbles up
/// as the conflict it is.
const SLUG_INSERT_ATTEMPTS: usize = 2;

/// Service for category management and the public category listing
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let records = self.categories.list().await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Paged listing for the public site. Page math runs against the
    /// current row count, so an out-of-range page is rejected before any
    /// row query happens.
    pub async fn list_page(
        &self,
        page: i64,
        per_page: i64,
    ) -> Result<(Vec<CategoryResponseDto>, PaginationMeta)> {
        let total = self.categories.count().await?;
        let window = crate::shared::pagination::apply(total, page, per_page)?;

        let limit = window.last_index - window.first_index;
        let records = if limit == 0 {
            Vec::new()
        } else {
            self.categories.list_page(limit, window.first_index).await?
        };

        let meta = PaginationMeta {
            total_records: window.total_count,
            page: window.page,
            per_page: window.per_page,
            total_pages: window.page_count,
        };

        Ok((records.into_iter().map(Into::into).collect(), meta))
    }

    pub async fn get(&self, id: i64) -> Result<CategoryResponseDto> {
        let record = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        Ok(record.into())
    }

    pub async fn create(&self, user_id: i64, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let mut conflict = None;
        for _ in 0..SLUG_INSERT_ATTEMPTS {
            let slug = self.resolve_slug(&dto.title).await?;
            match self.categories.insert(&dto.title, &slug, user_id).await {
                Ok(record) => return Ok(record.into()),
                Err(AppError::Conflict(msg)) => {
                    tracing::warn!(slug = %slug, "Category slug collided, re-resolving");
                    conflict = Some(AppError::Conflict(msg));
                }
                Err(e) => return Err(e),
            }
        }

        Err(conflict
            .unwrap_or_else(|| AppError::Internal("Category insert did not run".to_string())))
    }

    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let current = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        // An unchanged title keeps its slug stable.
        let slug = if current.title == dto.title {
            current.slug.clone()
        } else {
            self.resolve_slug(&dto.title).await?
        };

        let updated = self.categories.update(id, &dto.title, &slug).await?;
        if updated == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let in_use = self.categories.contents_count(id).await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Category is used by {} content(s) and cannot be deleted",
                in_use
            )));
        }

        let deleted = self.categories.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn resolve_slug(&self, title: &str) -> Result<String> {
        let base = slug::slugify(title);
        if base.is_empty() {
            return Err(AppError::Validation(
                "Title must contain at least one alphanumeric character".to_string(),
            ));
        }

        let existing = self.categories.slugs_with_prefix(&base).await?;
        Ok(slug::next_slug(&base, &existing))
    }
}
