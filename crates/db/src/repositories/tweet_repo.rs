//! Repository for the `tweets` table.

use cliptube_core::types::DbId;
use sqlx::PgPool;

use crate::models::tweet::{CreateTweet, Tweet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, content, like_count, deleted_at, created_at, updated_at";

pub struct TweetRepo;

impl TweetRepo {
    /// Insert a new tweet, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTweet) -> Result<Tweet, sqlx::Error> {
        let query = format!(
            "INSERT INTO tweets (owner_id, content)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tweet>(&query)
            .bind(input.owner_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a tweet by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tweet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tweets WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Tweet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's tweets, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Tweet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tweets
             WHERE owner_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Tweet>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a tweet's content, returning the updated row.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Tweet>, sqlx::Error> {
        let query = format!(
            "UPDATE tweets SET content = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tweet>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }
}
