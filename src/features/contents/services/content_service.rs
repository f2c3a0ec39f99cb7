use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::contents::dtos::{
    ContentFilter, ContentResponseDto, CreateContentDto, UpdateContentDto,
};
use crate::features::contents::repository::ContentRepository;
use crate::modules::storage::ObjectStorage;
use crate::shared::types::PaginationMeta;

/// Service for content management, the public listing and image uploads
pub struct ContentService {
    contents: Arc<dyn ContentRepository>,
    storage: Arc<dyn ObjectStorage>,
    temp_dir: PathBuf,
}

impl ContentService {
    pub fn new(
        contents: Arc<dyn ContentRepository>,
        storage: Arc<dyn ObjectStorage>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            contents,
            storage,
            temp_dir: temp_dir.into(),
        }
    }

    /// Runs the filter against the repository and derives the page block
    /// from the matched row count.
    pub async fn list(
        &self,
        filter: &ContentFilter,
    ) -> Result<(Vec<ContentResponseDto>, PaginationMeta)> {
        let (records, total) = self.contents.list(filter).await?;

        let limit = filter.limit();
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        let meta = PaginationMeta {
            total_records: total,
            page: filter.page,
            per_page: filter.limit,
            total_pages,
        };

        Ok((records.into_iter().map(Into::into).collect(), meta))
    }

    pub async fn get(&self, id: i64) -> Result<ContentResponseDto> {
        let record = self
            .contents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content with id {} not found", id)))?;

        Ok(record.into())
    }

    pub async fn create(&self, user_id: i64, dto: CreateContentDto) -> Result<ContentResponseDto> {
        let record = self.contents.insert(&dto.into_new_content(user_id)).await?;
        Ok(record.into())
    }

    /// Rewrites the record in place; the editing user becomes the recorded
    /// creator.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        dto: UpdateContentDto,
    ) -> Result<ContentResponseDto> {
        let updated = self
            .contents
            .update(id, &dto.into_new_content(user_id))
            .await?;
        if updated == 0 {
            return Err(AppError::NotFound(format!(
                "Content with id {} not found",
                id
            )));
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted = self.contents.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "Content with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Stages the image under the temp directory, pushes it to object
    /// storage and returns the public URL. The staging file is removed
    /// whether or not the upload succeeded; a failed removal is logged, not
    /// surfaced.
    pub async fn upload_image(
        &self,
        user_id: i64,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        // Key the object by uploader and nanosecond timestamp so concurrent
        // uploads from the same process cannot collide.
        let key = format!(
            "{}-{}",
            user_id,
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        let temp_path = self.temp_dir.join(&key);

        tokio::fs::write(&temp_path, &data).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to stage upload at {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        let uploaded = self.storage.upload(&key, data, content_type).await;

        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            tracing::warn!(
                "Failed to remove staged upload {}: {}",
                temp_path.display(),
                e
            );
        }

        uploaded?;
        Ok(self.storage.public_url(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::contents::dtos::{ContentOrderBy, SortDirection};
    use crate::features::contents::models::{ContentRecord, ContentStatus, NewContent};
    use async_trait::async_trait;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockContentRepository {
        records: Mutex<Vec<ContentRecord>>,
        inserted: Mutex<Vec<NewContent>>,
        updated: Mutex<Vec<(i64, NewContent)>>,
        seen_filters: Mutex<Vec<ContentFilter>>,
    }

    impl MockContentRepository {
        fn with_records(records: Vec<ContentRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ContentRepository for MockContentRepository {
        async fn list(&self, filter: &ContentFilter) -> Result<(Vec<ContentRecord>, i64)> {
            self.seen_filters.lock().unwrap().push(filter.clone());

            let records = self.records.lock().unwrap();
            let matched: Vec<ContentRecord> = records
                .iter()
                .filter(|r| filter.status.is_none_or(|s| r.status == s))
                .filter(|r| filter.category_id.is_none_or(|c| r.category_id == c))
                .filter(|r| {
                    filter
                        .search
                        .as_ref()
                        .is_none_or(|s| r.title.to_lowercase().contains(&s.to_lowercase()))
                })
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
            self.inserted.lock().unwrap().push(content.clone());
            let record = record_from(99, content);
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update(&self, id: i64, content: &NewContent) -> Result<u64> {
            let mut records = self.records.lock().unwrap();
            let Some(existing) = records.iter_mut().find(|r| r.id == id) else {
                return Ok(0);
            };
            *existing = record_from(id, content);
            self.updated.lock().unwrap().push((id, content.clone()));
            Ok(1)
        }

        async fn delete(&self, id: i64) -> Result<u64> {
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.id != id);
            Ok((before - records.len()) as u64)
        }
    }

    #[derive(Default)]
    struct MockStorage {
        uploads: Mutex<Vec<(String, usize, String)>>,
        fail_uploads: bool,
    }

    #[async_trait]
    impl ObjectStorage for MockStorage {
        async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
            if self.fail_uploads {
                return Err(AppError::Internal("upload refused".to_string()));
            }
            self.uploads.lock().unwrap().push((
                key.to_string(),
                data.len(),
                content_type.to_string(),
            ));
            Ok(key.to_string())
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://cdn.test/{}", key)
        }
    }

    fn record_from(id: i64, content: &NewContent) -> ContentRecord {
        ContentRecord {
            id,
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
        }
    }

    fn record(id: i64, status: ContentStatus) -> ContentRecord {
        ContentRecord {
            id,
            title: Sentence(1..3).fake(),
            excerpt: Sentence(1..3).fake(),
            description: Sentence(3..6).fake(),
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

    fn default_filter() -> ContentFilter {
        ContentFilter {
            page: 1,
            limit: 10,
            search: None,
            order_by: ContentOrderBy::default(),
            order_type: SortDirection::default(),
            status: None,
            category_id: None,
        }
    }

    fn service(repo: Arc<MockContentRepository>, storage: Arc<MockStorage>) -> ContentService {
        ContentService::new(repo, storage, std::env::temp_dir())
    }

    fn create_dto(tags: &str) -> CreateContentDto {
        CreateContentDto {
            title: "Fresh headline".to_string(),
            excerpt: "Short teaser".to_string(),
            description: "Full body".to_string(),
            image: "https://cdn.test/cover.png".to_string(),
            tags: tags.to_string(),
            status: ContentStatus::Draft,
            category_id: 1,
        }
    }

    #[tokio::test]
    async fn test_list_computes_ceil_total_pages() {
        let records = (1..=10)
            .map(|id| record(id, ContentStatus::Published))
            .collect();
        let repo = Arc::new(MockContentRepository::with_records(records));
        let service = service(repo, Arc::new(MockStorage::default()));

        let filter = ContentFilter {
            limit: 4,
            ..default_filter()
        };
        let (items, meta) = service.list(&filter).await.unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(meta.total_records, 10);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.per_page, 4);
    }

    #[tokio::test]
    async fn test_list_zero_results_is_empty_not_error() {
        let repo = Arc::new(MockContentRepository::default());
        let service = service(repo, Arc::new(MockStorage::default()));

        let (items, meta) = service.list(&default_filter()).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(meta.total_records, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[tokio::test]
    async fn test_list_forwards_filter_untouched() {
        let repo = Arc::new(MockContentRepository::default());
        let service = service(repo.clone(), Arc::new(MockStorage::default()));

        let filter = ContentFilter {
            search: Some("budget".to_string()),
            status: Some(ContentStatus::Published),
            category_id: Some(3),
            ..default_filter()
        };
        service.list(&filter).await.unwrap();

        let seen = repo.seen_filters.lock().unwrap();
        assert_eq!(seen.as_slice(), &[filter]);
    }

    #[tokio::test]
    async fn test_create_passes_tags_through_and_splits_response() {
        let repo = Arc::new(MockContentRepository::default());
        let service = service(repo.clone(), Arc::new(MockStorage::default()));

        let dto = service.create(7, create_dto("rust,axum")).await.unwrap();

        let inserted = repo.inserted.lock().unwrap();
        assert_eq!(inserted[0].tags, "rust,axum");
        assert_eq!(inserted[0].created_by_id, 7);
        assert_eq!(dto.tags, vec!["rust", "axum"]);
    }

    #[tokio::test]
    async fn test_create_empty_tags_round_trip_as_single_empty_element() {
        let repo = Arc::new(MockContentRepository::default());
        let service = service(repo.clone(), Arc::new(MockStorage::default()));

        let dto = service.create(7, create_dto("")).await.unwrap();

        assert_eq!(repo.inserted.lock().unwrap()[0].tags, "");
        assert_eq!(dto.tags, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = Arc::new(MockContentRepository::default());
        let service = service(repo, Arc::new(MockStorage::default()));

        let err = service.get(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_reassigns_creator_to_editor() {
        let mut existing = record(5, ContentStatus::Draft);
        existing.created_by_id = 1;
        let repo = Arc::new(MockContentRepository::with_records(vec![existing]));
        let service = service(repo.clone(), Arc::new(MockStorage::default()));

        let dto = UpdateContentDto {
            title: "Edited".to_string(),
            excerpt: "Edited teaser".to_string(),
            description: "Edited body".to_string(),
            image: "https://cdn.test/edit.png".to_string(),
            tags: "edited".to_string(),
            status: ContentStatus::Published,
            category_id: 1,
        };
        let updated = service.update(5, 9, dto).await.unwrap();

        assert_eq!(updated.title, "Edited");
        let calls = repo.updated.lock().unwrap();
        assert_eq!(calls[0].1.created_by_id, 9);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = Arc::new(MockContentRepository::default());
        let service = service(repo, Arc::new(MockStorage::default()));

        let dto = UpdateContentDto {
            title: "Edited".to_string(),
            excerpt: "Teaser".to_string(),
            description: "Body".to_string(),
            image: String::new(),
            tags: String::new(),
            status: ContentStatus::Draft,
            category_id: 1,
        };
        let err = service.update(42, 1, dto).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = Arc::new(MockContentRepository::default());
        let service = service(repo, Arc::new(MockStorage::default()));

        let err = service.delete(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    async fn temp_dir_for_test() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("newsdesk-upload-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        dir
    }

    #[tokio::test]
    async fn test_upload_image_stages_then_removes_temp_file() {
        let storage = Arc::new(MockStorage::default());
        let repo = Arc::new(MockContentRepository::default());
        let dir = temp_dir_for_test().await;
        let service = ContentService::new(repo, storage.clone(), &dir);

        let url = service
            .upload_image(7, b"png-bytes".to_vec(), "image/png")
            .await
            .unwrap();

        let uploads = storage.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        let (key, size, content_type) = &uploads[0];
        assert!(key.starts_with("7-"));
        assert_eq!(*size, b"png-bytes".len());
        assert_eq!(content_type, "image/png");
        assert_eq!(url, format!("https://cdn.test/{}", key));

        // The staging file must be gone once the upload finished.
        let mut entries = tokio::fs::read_dir(&dir).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_image_removes_temp_file_on_storage_failure() {
        let storage = Arc::new(MockStorage {
            fail_uploads: true,
            ..Default::default()
        });
        let repo = Arc::new(MockContentRepository::default());
        let dir = temp_dir_for_test().await;
        let service = ContentService::new(repo, storage, &dir);

        let err = service
            .upload_image(7, b"png-bytes".to_vec(), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));

        let mut entries = tokio::fs::read_dir(&dir).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
