//! Handlers for the `/users` resource (own account + public channel pages).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cliptube_core::error::CoreError;
use cliptube_core::types::DbId;
use cliptube_db::lifecycle::Lifecycle;
use cliptube_db::models::tweet::Tweet;
use cliptube_db::models::user::{UpdateUser, UserProfile};
use cliptube_db::models::video::Video;
use cliptube_db::repositories::{TweetRepo, UserRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PATCH /api/v1/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let updated = UserRepo::update(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}

/// DELETE /api/v1/users/me
///
/// Deactivate the account. Owned videos, tweets, and playlists stay live;
/// the subscriber counter freezes at its last value. Returns 204.
pub async fn deactivate_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<StatusCode> {
    Lifecycle::deactivate_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}
///
/// Public channel profile.
pub async fn get_channel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = UserRepo::find_profile(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/users/{id}/videos
///
/// A channel's published videos, newest first.
pub async fn list_channel_videos(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Video>>>> {
    let videos = VideoRepo::list_published_by_owner(&state.pool, id).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// GET /api/v1/users/{id}/tweets
///
/// A channel's tweets, newest first.
pub async fn list_channel_tweets(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Tweet>>>> {
    let tweets = TweetRepo::list_by_owner(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tweets }))
}
