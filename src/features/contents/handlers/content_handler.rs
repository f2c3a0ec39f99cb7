use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::contents::dtos::{
    ContentListParams, ContentResponseDto, CreateContentDto, UpdateContentDto, UploadImageDto,
    UploadImageResponseDto,
};
use crate::features::contents::models::ContentStatus;
use crate::features::contents::services::ContentService;
use crate::shared::constants::{
    is_image_type_allowed, ALLOWED_IMAGE_TYPES, DEFAULT_PAGE_SIZE, MAX_UPLOAD_SIZE,
    PUBLIC_PAGE_SIZE,
};
use crate::shared::types::ApiResponse;

/// List contents with filters, drafts included
#[utoipa::path(
    get,
    path = "/api/admin/contents",
    params(ContentListParams),
    responses(
        (status = 200, description = "Contents fetched successfully", body = ApiResponse<Vec<ContentResponseDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "contents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_contents(
    State(service): State<Arc<ContentService>>,
    Query(params): Query<ContentListParams>,
) -> Result<Json<ApiResponse<Vec<ContentResponseDto>>>> {
    let filter = params.parse(DEFAULT_PAGE_SIZE)?;
    let (contents, pagination) = service.list(&filter).await?;

    Ok(Json(ApiResponse::success_with_pagination(
        contents,
        "Contents fetched successfully",
        pagination,
    )))
}

/// Get a content record by id
#[utoipa::path(
    get,
    path = "/api/admin/contents/{id}",
    params(
        ("id" = i64, Path, description = "Content id")
    ),
    responses(
        (status = 200, description = "Content fetched successfully", body = ApiResponse<ContentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Content not found")
    ),
    tag = "contents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_content(
    State(service): State<Arc<ContentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    let content = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        content,
        "Content fetched successfully",
    )))
}

/// Create a content record
#[utoipa::path(
    post,
    path = "/api/admin/contents",
    request_body = CreateContentDto,
    responses(
        (status = 201, description = "Content created successfully", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "contents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_content(
    user: AuthenticatedUser,
    State(service): State<Arc<ContentService>>,
    AppJson(dto): AppJson<CreateContentDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let content = service.create(user.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(content, "Content created successfully")),
    ))
}

/// Update a content record
#[utoipa::path(
    put,
    path = "/api/admin/contents/{id}",
    params(
        ("id" = i64, Path, description = "Content id")
    ),
    request_body = UpdateContentDto,
    responses(
        (status = 200, description = "Content updated successfully", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Content not found")
    ),
    tag = "contents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_content(
    user: AuthenticatedUser,
    State(service): State<Arc<ContentService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateContentDto>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let content = service.update(id, user.id, dto).await?;
    Ok(Json(ApiResponse::success(
        content,
        "Content updated successfully",
    )))
}

/// Delete a content record
#[utoipa::path(
    delete,
    path = "/api/admin/contents/{id}",
    params(
        ("id" = i64, Path, description = "Content id")
    ),
    responses(
        (status = 200, description = "Content deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Content not found")
    ),
    tag = "contents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_content(
    State(service): State<Arc<ContentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success((), "Content deleted successfully")))
}

/// Upload a content image
///
/// Accepts multipart/form-data with:
/// - `image`: The image file to upload (required)
#[utoipa::path(
    post,
    path = "/api/admin/contents/upload-image",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image upload form",
    ),
    responses(
        (status = 201, description = "Image uploaded successfully", body = ApiResponse<UploadImageResponseDto>),
        (status = 400, description = "Invalid image or upload too large"),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "Image too large")
    ),
    tag = "contents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_content_image(
    user: AuthenticatedUser,
    State(service): State<Arc<ContentService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadImageResponseDto>>)> {
    let mut image_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                image_data = Some(data.to_vec());
                content_type = Some(ct);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let image_data =
        image_data.ok_or_else(|| AppError::BadRequest("Image is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    if image_data.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::BadRequest(format!(
            "Image too large. Maximum size is {} bytes ({} MB)",
            MAX_UPLOAD_SIZE,
            MAX_UPLOAD_SIZE / 1024 / 1024
        )));
    }

    if !is_image_type_allowed(&content_type) {
        return Err(AppError::BadRequest(format!(
            "Image type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }

    let url = service
        .upload_image(user.id, image_data, &content_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            UploadImageResponseDto { url },
            "Image uploaded successfully",
        )),
    ))
}

/// List published contents for the public site
#[utoipa::path(
    get,
    path = "/api/fe/contents",
    params(ContentListParams),
    responses(
        (status = 200, description = "Contents fetched successfully", body = ApiResponse<Vec<ContentResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "contents"
)]
pub async fn list_contents_public(
    State(service): State<Arc<ContentService>>,
    Query(params): Query<ContentListParams>,
) -> Result<Json<ApiResponse<Vec<ContentResponseDto>>>> {
    let mut filter = params.parse(PUBLIC_PAGE_SIZE)?;
    // The public site never sees drafts.
    filter.status = Some(ContentStatus::Published);

    let (contents, pagination) = service.list(&filter).await?;

    Ok(Json(ApiResponse::success_with_pagination(
        contents,
        "Contents fetched successfully",
        pagination,
    )))
}

/// Get a content record for the public site
#[utoipa::path(
    get,
    path = "/api/fe/contents/{id}",
    params(
        ("id" = i64, Path, description = "Content id")
    ),
    responses(
        (status = 200, description = "Content fetched successfully", body = ApiResponse<ContentResponseDto>),
        (status = 404, description = "Content not found")
    ),
    tag = "contents"
)]
pub async fn get_content_public(
    State(service): State<Arc<ContentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    let content = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        content,
        "Content fetched successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::contents::dtos::ContentFilter;
    use crate::features::contents::models::{ContentRecord, NewContent};
    use crate::features::contents::repository::ContentRepository;
    use crate::features::contents::routes;
    use crate::modules::storage::ObjectStorage;
    use crate::shared::test_helpers::with_admin_auth;
    use async_trait::async_trait;
    use axum::body::Bytes;
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockContentRepository {
        records: Mutex<Vec<ContentRecord>>,
        seen_filters: Mutex<Vec<ContentFilter>>,
    }

    #[async_trait]
    impl ContentRepository for MockContentRepository {
        async fn list(&self, filter: &ContentFilter) -> Result<(Vec<ContentRecord>, i64)> {
            self.seen_filters.lock().unwrap().push(filter.clone());

            let records = self.records.lock().unwrap();
            let matched: Vec<ContentRecord> = records
                .iter()
                .filter(|r| filter.status.is_none_or(|s| r.status == s))
                .cloned()
                .collect();

            let total = matched.len() as i64;
            let window = matched
                .into_iter()
                .skip(filter.offset() as usize)
                .take(filter.limit() as usize)
                .collect();
            Ok((window, total))
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<ContentRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn insert(&self, content: &NewContent) -> Result<ContentRecord> {
            let record = ContentRecord {
                id: 1,
                title: content.title.clone(),
                excerpt: content.excerpt.clone(),
                description: content.description.clone(),
                image: content.image.clone(),
                tags: content.tags.clone(),
                status: content.status,
                category_id: content.category_id,
                category_name: "News".to_string(),
                created_by_id: content.created_by_id,
                author: "Admin".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update(&self, _id: i64, _content: &NewContent) -> Result<u64> {
            Ok(0)
        }

        async fn delete(&self, id: i64) -> Result<u64> {
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.id != id);
            Ok((before - records.len()) as u64)
        }
    }

    #[derive(Default)]
    struct MockStorage;

    #[async_trait]
    impl ObjectStorage for MockStorage {
        async fn upload(&self, key: &str, _data: Vec<u8>, _content_type: &str) -> Result<String> {
            Ok(key.to_string())
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://cdn.test/{}", key)
        }
    }

    fn record(id: i64, status: ContentStatus) -> ContentRecord {
        ContentRecord {
            id,
            title: format!("Story {}", id),
            excerpt: "Teaser".to_string(),
            description: "Body".to_string(),
            image: format!("https://cdn.test/{}.png", id),
            tags: "news,local".to_string(),
            status,
            category_id: 1,
            category_name: "News".to_string(),
            created_by_id: 1,
            author: "Admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn temp_dir_for_test() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("newsdesk-handler-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        dir
    }

    fn service_with(
        records: Vec<ContentRecord>,
        temp_dir: PathBuf,
    ) -> (Arc<ContentService>, Arc<MockContentRepository>) {
        let repo = Arc::new(MockContentRepository {
            records: Mutex::new(records),
            ..Default::default()
        });
        let service = Arc::new(ContentService::new(
            repo.clone(),
            Arc::new(MockStorage),
            temp_dir,
        ));
        (service, repo)
    }

    fn public_server(records: Vec<ContentRecord>) -> (TestServer, Arc<MockContentRepository>) {
        let (service, repo) = service_with(records, std::env::temp_dir());
        let server = TestServer::new(routes::public_routes(service)).unwrap();
        (server, repo)
    }

    fn admin_server(records: Vec<ContentRecord>, temp_dir: PathBuf) -> TestServer {
        let (service, _) = service_with(records, temp_dir);
        TestServer::new(with_admin_auth(routes::admin_routes(service))).unwrap()
    }

    fn multipart_body(boundary: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"cover\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        body
    }

    #[tokio::test]
    async fn test_public_listing_forces_published_and_default_page_size() {
        let mut records: Vec<ContentRecord> = (1..=8)
            .map(|id| record(id, ContentStatus::Published))
            .collect();
        records.push(record(9, ContentStatus::Draft));
        records.push(record(10, ContentStatus::Draft));
        let (server, repo) = public_server(records);

        let response = server.get("/api/fe/contents").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 6);
        assert!(data.iter().all(|item| item["status"] == "PUBLISHED"));

        assert_eq!(body["pagination"]["totalRecords"], 8);
        assert_eq!(body["pagination"]["perPage"], 6);
        assert_eq!(body["pagination"]["totalPages"], 2);

        let seen = repo.seen_filters.lock().unwrap();
        assert_eq!(seen[0].status, Some(ContentStatus::Published));
        assert_eq!(seen[0].limit, 6);
    }

    #[tokio::test]
    async fn test_public_listing_rejects_unparseable_page() {
        let (server, _) = public_server(Vec::new());

        let response = server.get("/api/fe/contents?page=abc").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["meta"]["status"], false);
        assert_eq!(body["meta"]["message"], "Invalid page number");
    }

    #[tokio::test]
    async fn test_public_detail_missing_is_404() {
        let (server, _) = public_server(Vec::new());

        let response = server.get("/api/fe/contents/99").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_listing_includes_drafts() {
        let records = vec![
            record(1, ContentStatus::Published),
            record(2, ContentStatus::Draft),
        ];
        let server = admin_server(records, std::env::temp_dir());

        let response = server.get("/api/admin/contents").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["perPage"], 10);
    }

    #[tokio::test]
    async fn test_create_requires_authentication() {
        let (service, _) = service_with(Vec::new(), std::env::temp_dir());
        let server = TestServer::new(routes::admin_routes(service)).unwrap();

        let response = server
            .post("/api/admin/contents")
            .json(&json!({
                "title": "T",
                "excerpt": "E",
                "description": "D",
                "image": "",
                "tags": "",
                "status": "DRAFT",
                "categoryId": 1
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_content_returns_created_record() {
        let server = admin_server(Vec::new(), std::env::temp_dir());

        let response = server
            .post("/api/admin/contents")
            .json(&json!({
                "title": "Budget passes",
                "excerpt": "Council vote",
                "description": "Full report",
                "image": "https://cdn.test/cover.png",
                "tags": "politics,economy",
                "status": "PUBLISHED",
                "categoryId": 1
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["meta"]["message"], "Content created successfully");
        assert_eq!(body["data"]["tags"], json!(["politics", "economy"]));
        assert_eq!(body["data"]["author"], "Admin");
    }

    #[tokio::test]
    async fn test_create_content_rejects_blank_title() {
        let server = admin_server(Vec::new(), std::env::temp_dir());

        let response = server
            .post("/api/admin/contents")
            .json(&json!({
                "title": "",
                "excerpt": "E",
                "description": "D",
                "image": "",
                "tags": "",
                "status": "DRAFT",
                "categoryId": 1
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_content_type() {
        let dir = temp_dir_for_test().await;
        let server = admin_server(Vec::new(), dir.clone());

        let boundary = "newsdesk-test-boundary";
        let body = multipart_body(boundary, "application/pdf", b"%PDF-1.4");
        let response = server
            .post("/api/admin/contents/upload-image")
            .content_type(&format!("multipart/form-data; boundary={boundary}"))
            .bytes(Bytes::from(body))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert!(json["meta"]["message"]
            .as_str()
            .unwrap()
            .contains("not allowed"));
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_image_returns_public_url() {
        let dir = temp_dir_for_test().await;
        let server = admin_server(Vec::new(), dir.clone());

        let boundary = "newsdesk-test-boundary";
        let body = multipart_body(boundary, "image/png", b"png-bytes");
        let response = server
            .post("/api/admin/contents/upload-image")
            .content_type(&format!("multipart/form-data; boundary={boundary}"))
            .bytes(Bytes::from(body))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let json: Value = response.json();
        assert_eq!(json["meta"]["message"], "Image uploaded successfully");
        // Object keys are {userId}-{nanos}; the test admin is user 1.
        assert!(json["data"]["url"]
            .as_str()
            .unwrap()
            .starts_with("https://cdn.test/1-"));
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
