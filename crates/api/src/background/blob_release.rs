//! Blob release worker.
//!
//! Drains the `blob_release_queue` table: for each due job it asks the object
//! store to delete the blob, dropping the job on success and rescheduling it
//! with exponential backoff on failure. Deactivation already happened by the
//! time a job exists here, so a failed release never blocks or reverses
//! anything; it just tries again later.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use cliptube_blob::BlobStore;
use cliptube_db::repositories::BlobReleaseRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the worker polls for due jobs.
const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Jobs claimed per poll.
const BATCH_SIZE: i64 = 20;

/// Base delay for the exponential backoff, in seconds.
const BACKOFF_BASE_SECS: i64 = 60;

/// Cap on the backoff exponent; 2^6 minutes is a little over an hour.
const BACKOFF_MAX_EXPONENT: u32 = 6;

/// Run the blob release loop until `cancel` is triggered.
pub async fn run(pool: PgPool, store: Arc<dyn BlobStore>, cancel: CancellationToken) {
    tracing::info!(
        poll_secs = POLL_INTERVAL.as_secs(),
        batch_size = BATCH_SIZE,
        "Blob release worker started"
    );

    let mut interval = tokio::time::interval(POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Blob release worker stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = drain_batch(&pool, store.as_ref()).await {
                    tracing::error!(error = %e, "Blob release: batch failed");
                }
            }
        }
    }
}

/// Process one batch of due jobs.
async fn drain_batch(pool: &PgPool, store: &dyn BlobStore) -> Result<(), sqlx::Error> {
    let jobs = BlobReleaseRepo::claim_due(pool, BATCH_SIZE).await?;

    for job in jobs {
        match store.release(&job.blob_key).await {
            Ok(()) => {
                BlobReleaseRepo::mark_released(pool, job.id).await?;
                tracing::info!(blob_key = %job.blob_key, "Blob released");
            }
            Err(e) => {
                let next_attempt_at = Utc::now() + backoff_delay(job.attempts);
                BlobReleaseRepo::mark_failed(pool, job.id, &e.to_string(), next_attempt_at)
                    .await?;
                tracing::warn!(
                    blob_key = %job.blob_key,
                    attempts = job.attempts + 1,
                    error = %e,
                    "Blob release failed, rescheduled"
                );
            }
        }
    }

    Ok(())
}

/// Exponential backoff: base * 2^attempts, capped.
fn backoff_delay(attempts: i32) -> chrono::Duration {
    let exponent = (attempts.max(0) as u32).min(BACKOFF_MAX_EXPONENT);
    chrono::Duration::seconds(BACKOFF_BASE_SECS << exponent)
}
