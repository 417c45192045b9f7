//! Soft-delete lifecycle.
//!
//! The only module that flips `deleted_at`. Cascades are declared here per
//! entity kind rather than inferred at call sites or hidden in storage
//! triggers:
//!
//! | entity   | cascade                         | blobs enqueued for release |
//! |----------|---------------------------------|----------------------------|
//! | Video    | its comments                    | video file, thumbnail      |
//! | Comment  | none                            | none                       |
//! | Tweet    | none                            | none                       |
//! | Playlist | none (membership rows kept)     | none                       |
//! | User     | none (owned entities stay live) | avatar, cover image        |
//!
//! Deactivation is the durable fact. Blob handles are enqueued into
//! `blob_release_queue` in the same transaction; the actual object-store
//! deletion happens later in a background task and its failure never blocks
//! or reverses the deactivation. Relations that target a deactivated entity
//! are left in place and its counters stay frozen at their last value; the
//! toggle engine rejects new writes against it.

use cliptube_core::types::DbId;
use sqlx::{PgConnection, PgPool};

pub struct Lifecycle;

impl Lifecycle {
    /// Deactivate a video: soft-delete the row and its comments, enqueue the
    /// media blobs. Returns `false` if the video was already inactive.
    pub async fn deactivate_video(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let blobs: Option<(String, String)> = sqlx::query_as(
            "UPDATE videos SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING video_key, thumbnail_key",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((video_key, thumbnail_key)) = blobs else {
            return Ok(false);
        };

        let cascaded = sqlx::query(
            "UPDATE comments SET deleted_at = NOW(), updated_at = NOW()
             WHERE video_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        enqueue_blob(&mut tx, &video_key).await?;
        enqueue_blob(&mut tx, &thumbnail_key).await?;

        tx.commit().await?;

        tracing::info!(video_id = id, cascaded_comments = cascaded, "video deactivated");
        Ok(true)
    }

    /// Deactivate a comment. No cascade. Returns `false` if already inactive.
    pub async fn deactivate_comment(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE comments SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate a tweet. No cascade. Returns `false` if already inactive.
    pub async fn deactivate_tweet(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tweets SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate a playlist. Membership rows are kept (they become invisible
    /// through the playlist read paths). Returns `false` if already inactive.
    pub async fn deactivate_playlist(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE playlists SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate a user account: soft-delete the row, revoke the session,
    /// enqueue profile image blobs. Owned videos, tweets, and playlists are
    /// declared non-cascading and stay live.
    pub async fn deactivate_user(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let blobs: Option<(Option<String>, Option<String>)> = sqlx::query_as(
            "UPDATE users
             SET deleted_at = NOW(), refresh_token_hash = NULL, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING avatar_key, cover_image_key",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((avatar_key, cover_image_key)) = blobs else {
            return Ok(false);
        };

        for key in [avatar_key, cover_image_key].into_iter().flatten() {
            enqueue_blob(&mut tx, &key).await?;
        }

        tx.commit().await?;

        tracing::info!(user_id = id, "user deactivated");
        Ok(true)
    }
}

async fn enqueue_blob(conn: &mut PgConnection, blob_key: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO blob_release_queue (blob_key) VALUES ($1)")
        .bind(blob_key)
        .execute(conn)
        .await?;
    Ok(())
}
