//! S3-backed blob store.

use async_trait::async_trait;

use crate::{BlobError, BlobStore};

/// Production [`BlobStore`] backed by an S3 bucket.
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3BlobStore {
    /// Build a client from the ambient AWS environment (credentials chain,
    /// region, endpoint overrides for S3-compatible stores).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        S3BlobStore {
            client: aws_sdk_s3::Client::new(&config),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn release(&self, handle: &str) -> Result<(), BlobError> {
        // S3 DeleteObject succeeds on missing keys, which gives us the
        // idempotence the retry loop relies on.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(handle)
            .send()
            .await
            .map_err(|e| BlobError::Retryable(e.to_string()))?;

        tracing::debug!(handle, "blob released");
        Ok(())
    }
}
