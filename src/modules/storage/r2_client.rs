//! Cloudflare R2 storage client
//!
//! Thin wrapper around the S3-compatible R2 API for content image uploads.
//! Uses rust-s3 crate for lightweight S3 operations.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::debug;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Capability the content service needs from object storage. Kept narrow so
/// tests can swap in an in-memory double.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads `data` under `key` and returns the key as stored.
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;

    /// Public URL the object is served from after upload.
    fn public_url(&self, key: &str) -> String;
}

/// Cloudflare R2 client
pub struct R2Client {
    bucket: Box<Bucket>,
    public_base_url: String,
}

impl R2Client {
    /// Create a new R2 client from configuration. The bucket itself is
    /// managed outside the application and must already exist.
    pub fn new(config: &StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create R2 credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint(),
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| AppError::Internal(format!("Failed to create R2 bucket handle: {}", e)))?;

        // R2 serves buckets path-style (https://endpoint/bucket/key)
        bucket.set_path_style();

        Ok(Self {
            bucket,
            public_base_url: config.public_url.clone(),
        })
    }
}

#[async_trait]
impl ObjectStorage for R2Client {
    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to upload '{}': {}", key, e)))?;

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}
