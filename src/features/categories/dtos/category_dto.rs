use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::CategoryRecord;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub created_by_id: i64,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryRecord> for CategoryResponseDto {
    fn from(c: CategoryRecord) -> Self {
        Self {
            id: c.id,
            title: c.title,
            slug: c.slug,
            created_by_id: c.created_by_id,
            created_by_name: c.created_by_name,
            created_at: c.created_at,
        }
    }
}

/// Request DTO for creating a category
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
}

/// Request DTO for updating a category
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
}

/// Query parameters for the public category listing.
///
/// Carried as raw strings so an unparseable value is a 400, not a silent
/// default.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CategoryPageParams {
    /// Page number (1-indexed, default 1)
    pub page: Option<String>,
    /// Items per page (default 10)
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
}

impl CategoryPageParams {
    /// Resolves to `(page, per_page)`; a missing perPage becomes 0 so the
    /// pagination calculator applies its own default.
    pub fn parse(self) -> Result<(i64, i64)> {
        let page = match self.page {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest("Invalid page number".to_string()))?,
            None => 1,
        };

        let per_page = match self.per_page {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest("Invalid perPage number".to_string()))?,
            None => 0,
        };

        Ok((page, per_page))
    }
}
