//! Repository for the `playlists` and `playlist_videos` tables.

use cliptube_core::types::DbId;
use sqlx::PgPool;

use crate::models::playlist::{CreatePlaylist, Playlist, UpdatePlaylist};
use crate::models::video::Video;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, deleted_at, created_at, updated_at";

const VIDEO_COLUMNS: &str = "v.id, v.owner_id, v.title, v.description, v.video_key, \
    v.thumbnail_key, v.duration_secs, v.view_count, v.like_count, v.is_published, \
    v.deleted_at, v.created_at, v.updated_at";

pub struct PlaylistRepo;

impl PlaylistRepo {
    /// Insert a new playlist, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePlaylist) -> Result<Playlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO playlists (owner_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a playlist by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM playlists WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Playlist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's playlists, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Playlist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM playlists
             WHERE owner_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a playlist. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlaylist,
    ) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!(
            "UPDATE playlists SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    // ── Membership ───────────────────────────────────────────────────

    /// Add a video to a playlist. Idempotent: adding an existing member is a
    /// no-op. Returns `true` when a new membership row was created.
    pub async fn add_video(
        pool: &PgPool,
        playlist_id: DbId,
        video_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO playlist_videos (playlist_id, video_id)
             VALUES ($1, $2)
             ON CONFLICT (playlist_id, video_id) DO NOTHING",
        )
        .bind(playlist_id)
        .bind(video_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a video from a playlist. Returns `true` when a row was removed.
    pub async fn remove_video(
        pool: &PgPool,
        playlist_id: DbId,
        video_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2")
                .bind(playlist_id)
                .bind(video_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The playlist's videos in insertion order, skipping any that have since
    /// been deactivated or unpublished.
    pub async fn list_videos(pool: &PgPool, playlist_id: DbId) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos v
             JOIN playlist_videos pv ON pv.video_id = v.id
             WHERE pv.playlist_id = $1 AND v.is_published AND v.deleted_at IS NULL
             ORDER BY pv.added_at ASC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(playlist_id)
            .fetch_all(pool)
            .await
    }
}
