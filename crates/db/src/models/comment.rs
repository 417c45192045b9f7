//! Comment entity model and DTOs.

use cliptube_core::ownership::Owned;
use cliptube_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub video_id: DbId,
    pub owner_id: DbId,
    pub content: String,
    /// Ledger counter; written only by the toggle engine.
    pub like_count: i64,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Comment {
    const ENTITY: &'static str = "Comment";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// DTO for inserting a new comment.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub video_id: DbId,
    pub owner_id: DbId,
    pub content: String,
}
