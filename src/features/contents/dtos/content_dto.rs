use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::contents::models::{split_tags, ContentRecord, ContentStatus, NewContent};

/// Sort direction for content listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(AppError::BadRequest("Invalid orderType".to_string())),
        }
    }
}

/// Columns a content listing may be ordered by. Ordering input is mapped
/// through this whitelist so the raw query value never reaches the SQL text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentOrderBy {
    #[default]
    CreatedAt,
    Title,
    Status,
    Id,
}

impl ContentOrderBy {
    /// Column reference, qualified because the listing joins three tables.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ContentOrderBy::CreatedAt => "c.created_at",
            ContentOrderBy::Title => "c.title",
            ContentOrderBy::Status => "c.status",
            ContentOrderBy::Id => "c.id",
        }
    }

    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "created_at" | "createdAt" => Ok(ContentOrderBy::CreatedAt),
            "title" => Ok(ContentOrderBy::Title),
            "status" => Ok(ContentOrderBy::Status),
            "id" => Ok(ContentOrderBy::Id),
            _ => Err(AppError::BadRequest("Invalid orderBy column".to_string())),
        }
    }
}

/// Resolved filter set the content listing runs with.
///
/// `status` is never taken from the query string: the public listing pins it
/// to `PUBLISHED` and the admin listing leaves it unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFilter {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub order_by: ContentOrderBy,
    pub order_type: SortDirection,
    pub status: Option<ContentStatus>,
    pub category_id: Option<i64>,
}

impl ContentFilter {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    /// Row cap for the page query; a negative request degrades to zero rows
    /// instead of invalid SQL.
    pub fn limit(&self) -> i64 {
        self.limit.max(0)
    }
}

/// Query parameters accepted by the content listings.
///
/// Carried as raw strings so an unparseable value is a 400, not a silent
/// default.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ContentListParams {
    /// Page number (1-indexed, default 1)
    pub page: Option<String>,
    /// Items per page (default 10 for admin, 6 for the public listing)
    pub limit: Option<String>,
    /// Case-insensitive substring match against the title
    pub search: Option<String>,
    /// Sort column: created_at (default), title, status or id
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    /// Sort direction: asc or desc (default)
    #[serde(rename = "orderType")]
    pub order_type: Option<String>,
    /// Restrict to one category; 0 or absent means no filter
    #[serde(rename = "categoryID")]
    pub category_id: Option<String>,
}

impl ContentListParams {
    /// Resolves the raw parameters against `default_limit`, leaving `status`
    /// unset for the caller to pin.
    pub fn parse(self, default_limit: i64) -> Result<ContentFilter> {
        let page = match self.page {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest("Invalid page number".to_string()))?,
            None => 1,
        };

        let limit = match self.limit {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest("Invalid limit number".to_string()))?,
            None => default_limit,
        };

        let search = self.search.filter(|s| !s.is_empty());

        let order_by = match self.order_by.as_deref() {
            Some(raw) => ContentOrderBy::parse(raw)?,
            None => ContentOrderBy::default(),
        };

        let order_type = match self.order_type.as_deref() {
            Some(raw) => SortDirection::parse(raw)?,
            None => SortDirection::default(),
        };

        let category_id = match self.category_id {
            Some(raw) => {
                let id = raw
                    .parse::<i64>()
                    .map_err(|_| AppError::BadRequest("Invalid category ID".to_string()))?;
                (id != 0).then_some(id)
            }
            None => None,
        };

        Ok(ContentFilter {
            page,
            limit,
            search,
            order_by,
            order_type,
            status: None,
            category_id,
        })
    }
}

/// Response DTO for content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponseDto {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub status: ContentStatus,
    pub category_id: i64,
    pub category_name: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContentRecord> for ContentResponseDto {
    fn from(c: ContentRecord) -> Self {
        Self {
            id: c.id,
            title: c.title,
            excerpt: c.excerpt,
            description: c.description,
            image: c.image,
            tags: split_tags(&c.tags),
            status: c.status,
            category_id: c.category_id,
            category_name: c.category_name,
            author: c.author,
            created_at: c.created_at,
        }
    }
}

/// Request DTO for creating a content record. `tags` is one comma-separated
/// string; it is split at the service boundary.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentDto {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Excerpt is required"))]
    pub excerpt: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub image: String,
    #[schema(example = "politics,economy")]
    pub tags: String,
    pub status: ContentStatus,
    #[validate(range(min = 1, message = "categoryId is required"))]
    pub category_id: i64,
}

/// Request DTO for updating a content record; every field is rewritten.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentDto {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Excerpt is required"))]
    pub excerpt: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub image: String,
    #[schema(example = "politics,economy")]
    pub tags: String,
    pub status: ContentStatus,
    #[validate(range(min = 1, message = "categoryId is required"))]
    pub category_id: i64,
}

impl CreateContentDto {
    pub(crate) fn into_new_content(self, created_by_id: i64) -> NewContent {
        NewContent {
            title: self.title,
            excerpt: self.excerpt,
            description: self.description,
            image: self.image,
            tags: self.tags,
            status: self.status,
            category_id: self.category_id,
            created_by_id,
        }
    }
}

impl UpdateContentDto {
    pub(crate) fn into_new_content(self, created_by_id: i64) -> NewContent {
        NewContent {
            title: self.title,
            excerpt: self.excerpt,
            description: self.description,
            image: self.image,
            tags: self.tags,
            status: self.status,
            category_id: self.category_id,
            created_by_id,
        }
    }
}

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
}

/// Response DTO for image uploads
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadImageResponseDto {
    /// Public URL the uploaded image is served from
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let filter = ContentListParams::default().parse(10).unwrap();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.search, None);
        assert_eq!(filter.order_by, ContentOrderBy::CreatedAt);
        assert_eq!(filter.order_type, SortDirection::Desc);
        assert_eq!(filter.status, None);
        assert_eq!(filter.category_id, None);
    }

    #[test]
    fn test_list_params_parse_values() {
        let params = ContentListParams {
            page: Some("2".to_string()),
            limit: Some("25".to_string()),
            search: Some("election".to_string()),
            order_by: Some("title".to_string()),
            order_type: Some("asc".to_string()),
            category_id: Some("7".to_string()),
        };

        let filter = params.parse(10).unwrap();
        assert_eq!(filter.page, 2);
        assert_eq!(filter.limit, 25);
        assert_eq!(filter.search.as_deref(), Some("election"));
        assert_eq!(filter.order_by, ContentOrderBy::Title);
        assert_eq!(filter.order_type, SortDirection::Asc);
        assert_eq!(filter.category_id, Some(7));
    }

    #[test]
    fn test_list_params_reject_garbage_numbers() {
        let err = ContentListParams {
            page: Some("abc".to_string()),
            ..Default::default()
        }
        .parse(10)
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid page number"));

        let err = ContentListParams {
            limit: Some("1.5".to_string()),
            ..Default::default()
        }
        .parse(10)
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid limit number"));

        let err = ContentListParams {
            category_id: Some("news".to_string()),
            ..Default::default()
        }
        .parse(10)
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid category ID"));
    }

    #[test]
    fn test_list_params_category_zero_means_no_filter() {
        let params = ContentListParams {
            category_id: Some("0".to_string()),
            ..Default::default()
        };
        assert_eq!(params.parse(10).unwrap().category_id, None);
    }

    #[test]
    fn test_list_params_empty_search_is_no_filter() {
        let params = ContentListParams {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(params.parse(10).unwrap().search, None);
    }

    #[test]
    fn test_order_by_whitelist() {
        assert_eq!(
            ContentOrderBy::parse("createdAt").unwrap(),
            ContentOrderBy::CreatedAt
        );
        assert_eq!(
            ContentOrderBy::parse("created_at").unwrap(),
            ContentOrderBy::CreatedAt
        );
        assert_eq!(ContentOrderBy::parse("id").unwrap(), ContentOrderBy::Id);

        // Anything outside the whitelist is rejected, never spliced into SQL.
        let err = ContentOrderBy::parse("created_at; DROP TABLE contents").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_order_type_parse() {
        assert_eq!(SortDirection::parse("asc").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc").unwrap(), SortDirection::Desc);
        assert!(SortDirection::parse("sideways").is_err());
    }

    #[test]
    fn test_filter_offset_and_limit_floor() {
        let filter = ContentFilter {
            page: 3,
            limit: 6,
            search: None,
            order_by: ContentOrderBy::default(),
            order_type: SortDirection::default(),
            status: None,
            category_id: None,
        };
        assert_eq!(filter.offset(), 12);

        let degenerate = ContentFilter {
            page: 0,
            limit: -5,
            ..filter
        };
        assert_eq!(degenerate.limit(), 0);
        assert_eq!(degenerate.offset(), 0);
    }

    #[test]
    fn test_response_dto_splits_tags() {
        let record = ContentRecord {
            id: 1,
            title: "Title".to_string(),
            excerpt: "Excerpt".to_string(),
            description: "Body".to_string(),
            image: "https://cdn.example.com/1.png".to_string(),
            tags: "a,b".to_string(),
            status: ContentStatus::Published,
            category_id: 2,
            category_name: "News".to_string(),
            created_by_id: 3,
            author: "Admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let dto = ContentResponseDto::from(record);
        assert_eq!(dto.tags, vec!["a", "b"]);
        assert_eq!(dto.category_name, "News");
        assert_eq!(dto.author, "Admin");
    }
}
