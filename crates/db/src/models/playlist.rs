//! Playlist entity model and DTOs.

use cliptube_core::ownership::Owned;
use cliptube_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A playlist row from the `playlists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playlist {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Playlist {
    const ENTITY: &'static str = "Playlist";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// DTO for inserting a new playlist.
#[derive(Debug, Clone)]
pub struct CreatePlaylist {
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a playlist. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlaylist {
    pub name: Option<String>,
    pub description: Option<String>,
}
