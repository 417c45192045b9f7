//! Blob-storage collaborator.
//!
//! Media files live in an S3-compatible object store; the platform only holds
//! their handles. Nothing here runs inline with a mutation request: the
//! soft-delete lifecycle enqueues handles and a background task calls
//! [`BlobStore::release`] with retry.

use async_trait::async_trait;

pub mod memory;
pub mod s3;

pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

/// Failure modes of the object store.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// Transient failure; the caller should retry with backoff.
    #[error("retryable blob-store failure: {0}")]
    Retryable(String),
}

/// An object store that can release (delete) stored blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Release a stored object. Releasing a handle that no longer exists
    /// must succeed (the deletion is what matters, not who did it).
    async fn release(&self, handle: &str) -> Result<(), BlobError>;
}
