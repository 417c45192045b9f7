//! Video entity model and DTOs.

use cliptube_core::ownership::Owned;
use cliptube_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A video row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub description: String,
    pub video_key: String,
    pub thumbnail_key: String,
    pub duration_secs: f64,
    pub view_count: i64,
    /// Ledger counter; equals the number of active video-like relations
    /// targeting this video. Written only by the toggle engine.
    pub like_count: i64,
    pub is_published: bool,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Video {
    const ENTITY: &'static str = "Video";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// DTO for publishing a new video. Blob handles are supplied by the caller;
/// the upload itself happens against the object store directly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub description: String,
    pub video_key: String,
    pub thumbnail_key: String,
    pub duration_secs: f64,
}

/// DTO for updating video metadata. All fields are optional.
///
/// Deliberately excludes `like_count` and `view_count`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_key: Option<String>,
}
