//! Blob release queue model.

use cliptube_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A pending object-store deletion from the `blob_release_queue` table.
#[derive(Debug, Clone, FromRow)]
pub struct BlobReleaseJob {
    pub id: DbId,
    pub blob_key: String,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub next_attempt_at: Timestamp,
    pub created_at: Timestamp,
}
