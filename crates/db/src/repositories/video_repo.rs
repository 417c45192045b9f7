//! Repository for the `videos` table.

use cliptube_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, UpdateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, description, video_key, thumbnail_key, \
    duration_secs, view_count, like_count, is_published, deleted_at, created_at, updated_at";

/// Columns qualified for queries that join `relations`.
const COLUMNS_QUALIFIED: &str = "v.id, v.owner_id, v.title, v.description, v.video_key, \
    v.thumbnail_key, v.duration_secs, v.view_count, v.like_count, v.is_published, \
    v.deleted_at, v.created_at, v.updated_at";

pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row. Published by default.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (owner_id, title, description, video_key, thumbnail_key, duration_secs)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.video_key)
            .bind(&input.thumbnail_key)
            .bind(input.duration_secs)
            .fetch_one(pool)
            .await
    }

    /// Find a video by ID regardless of publish state. Excludes soft-deleted rows.
    ///
    /// Callers that serve public reads must check `is_published` (or ownership)
    /// themselves.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List published videos, newest first. Excludes soft-deleted rows.
    pub async fn list_published(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE is_published AND deleted_at IS NULL
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List a channel's published videos, newest first.
    pub async fn list_published_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE owner_id = $1 AND is_published AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Videos liked by `actor_id`, newest like first. Only published, active
    /// videos are returned; relations to deactivated targets are simply not
    /// surfaced here.
    pub async fn list_liked_by(pool: &PgPool, actor_id: DbId) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS_QUALIFIED} FROM videos v
             JOIN relations r ON r.target_id = v.id
             WHERE r.kind = 'video_like' AND r.actor_id = $1
               AND v.is_published AND v.deleted_at IS NULL
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(actor_id)
            .fetch_all(pool)
            .await
    }

    /// Update video metadata. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                thumbnail_key = COALESCE($4, thumbnail_key),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.thumbnail_key)
            .fetch_optional(pool)
            .await
    }

    /// Flip the publish flag, returning the updated row.
    pub async fn toggle_publish(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET is_published = NOT is_published, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record one view. View counts are plain usage telemetry, not a relation-
    /// backed ledger counter, so ordinary increments are fine here.
    pub async fn increment_view_count(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE videos SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
