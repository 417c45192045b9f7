//! Repository for the `users` table.

use cliptube_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, full_name, password_hash, avatar_key, \
    cover_image_key, refresh_token_hash, subscriber_count, deleted_at, created_at, updated_at";

/// Columns safe to expose in public channel profiles.
const PROFILE_COLUMNS: &str =
    "id, username, full_name, avatar_key, cover_image_key, subscriber_count, created_at";

/// Profile columns qualified for queries that join `relations`.
const PROFILE_COLUMNS_QUALIFIED: &str = "u.id, u.username, u.full_name, u.avatar_key, \
    u.cover_image_key, u.subscriber_count, u.created_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, full_name, password_hash, avatar_key, cover_image_key)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.password_hash)
            .bind(&input.avatar_key)
            .bind(&input.cover_image_key)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID. Excludes deactivated accounts.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the account exists and is not deactivated.
    ///
    /// Cheaper than [`UserRepo::find_by_id`] for the per-request auth check.
    pub async fn is_active(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND deleted_at IS NULL)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by username. Excludes deactivated accounts.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE username = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Public channel profile by ID. Excludes deactivated accounts.
    pub async fn find_profile(pool: &PgPool, id: DbId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query =
            format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public profiles of the subscribers of a channel, newest subscription first.
    pub async fn list_subscribers(
        pool: &PgPool,
        channel_id: DbId,
    ) -> Result<Vec<UserProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS_QUALIFIED} FROM users u
             JOIN relations r ON r.actor_id = u.id
             WHERE r.kind = 'subscription' AND r.target_id = $1 AND u.deleted_at IS NULL
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(channel_id)
            .fetch_all(pool)
            .await
    }

    /// Public profiles of the channels the actor subscribes to, newest
    /// subscription first.
    pub async fn list_subscribed_channels(
        pool: &PgPool,
        actor_id: DbId,
    ) -> Result<Vec<UserProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS_QUALIFIED} FROM users u
             JOIN relations r ON r.target_id = u.id
             WHERE r.kind = 'subscription' AND r.actor_id = $1 AND u.deleted_at IS NULL
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(actor_id)
            .fetch_all(pool)
            .await
    }

    /// Update a user's profile. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                full_name = COALESCE($2, full_name),
                avatar_key = COALESCE($3, avatar_key),
                cover_image_key = COALESCE($4, cover_image_key),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.avatar_key)
            .bind(&input.cover_image_key)
            .fetch_optional(pool)
            .await
    }

    /// Store (or clear) the hash of the user's current refresh token.
    pub async fn set_refresh_token_hash(
        pool: &PgPool,
        id: DbId,
        token_hash: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET refresh_token_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(token_hash)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Find the active account holding the given refresh-token hash.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE refresh_token_hash = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }
}
