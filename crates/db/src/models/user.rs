//! User (channel) entity model and DTOs.

use cliptube_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub avatar_key: Option<String>,
    pub cover_image_key: Option<String>,
    pub refresh_token_hash: Option<String>,
    /// Ledger counter; equals the number of active subscription relations
    /// targeting this user. Written only by the toggle engine.
    pub subscriber_count: i64,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public channel profile for API responses (no credentials).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_key: Option<String>,
    pub cover_image_key: Option<String>,
    pub subscriber_count: i64,
    pub created_at: Timestamp,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            avatar_key: user.avatar_key,
            cover_image_key: user.cover_image_key,
            subscriber_count: user.subscriber_count,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub avatar_key: Option<String>,
    pub cover_image_key: Option<String>,
}

/// DTO for updating a user's profile. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub avatar_key: Option<String>,
    pub cover_image_key: Option<String>,
}
