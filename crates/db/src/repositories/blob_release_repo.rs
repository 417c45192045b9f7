//! Repository for the `blob_release_queue` table.
//!
//! Jobs are enqueued by the lifecycle module (inside the deactivation
//! transaction) and drained by the blob-release background task.

use cliptube_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::cleanup::BlobReleaseJob;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, blob_key, attempts, last_error, next_attempt_at, created_at";

pub struct BlobReleaseRepo;

impl BlobReleaseRepo {
    /// Jobs whose next attempt is due, oldest first.
    pub async fn claim_due(pool: &PgPool, limit: i64) -> Result<Vec<BlobReleaseJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blob_release_queue
             WHERE next_attempt_at <= NOW()
             ORDER BY next_attempt_at ASC
             LIMIT $1"
        );
        sqlx::query_as::<_, BlobReleaseJob>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Drop a job after its blob has been released.
    pub async fn mark_released(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM blob_release_queue WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a failed attempt and schedule the next one.
    pub async fn mark_failed(
        pool: &PgPool,
        id: DbId,
        error: &str,
        next_attempt_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE blob_release_queue
             SET attempts = attempts + 1, last_error = $2, next_attempt_at = $3
             WHERE id = $1",
        )
        .bind(id)
        .bind(error)
        .bind(next_attempt_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Pending job count. Used by tests and operator tooling.
    pub async fn pending_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM blob_release_queue")
            .fetch_one(pool)
            .await
    }
}
