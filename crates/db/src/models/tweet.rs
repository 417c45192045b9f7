//! Tweet entity model and DTOs.

use cliptube_core::ownership::Owned;
use cliptube_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A tweet row from the `tweets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tweet {
    pub id: DbId,
    pub owner_id: DbId,
    pub content: String,
    /// Ledger counter; written only by the toggle engine.
    pub like_count: i64,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Tweet {
    const ENTITY: &'static str = "Tweet";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// DTO for inserting a new tweet.
#[derive(Debug, Clone)]
pub struct CreateTweet {
    pub owner_id: DbId,
    pub content: String,
}
