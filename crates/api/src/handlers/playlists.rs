//! Handlers for the `/playlists` resource and playlist membership.
//!
//! Membership is plain set semantics, not a counted relation: there is no
//! denormalized counter to keep in step, so these writes go through the
//! repository rather than the toggle engine.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cliptube_core::error::CoreError;
use cliptube_core::ownership::authorize_owner;
use cliptube_core::types::DbId;
use cliptube_db::lifecycle::Lifecycle;
use cliptube_db::models::playlist::{CreatePlaylist, Playlist, UpdatePlaylist};
use cliptube_db::models::video::Video;
use cliptube_db::repositories::{PlaylistRepo, VideoRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating a playlist.
#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    pub name: String,
    pub description: Option<String>,
}

/// POST /api/v1/playlists
pub async fn create_playlist(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<PlaylistRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Playlist>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Playlist name must not be empty".into(),
        )));
    }

    let playlist = PlaylistRepo::create(
        &state.pool,
        &CreatePlaylist {
            owner_id: auth_user.user_id,
            name: input.name,
            description: input.description,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: playlist })))
}

/// GET /api/v1/playlists
///
/// The authenticated user's playlists, newest first.
pub async fn list_my_playlists(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Playlist>>>> {
    let playlists = PlaylistRepo::list_by_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: playlists }))
}

/// GET /api/v1/playlists/{id}
pub async fn get_playlist(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Playlist>>> {
    let playlist = PlaylistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Playlist",
            id,
        }))?;
    Ok(Json(DataResponse { data: playlist }))
}

/// GET /api/v1/playlists/{id}/videos
///
/// The playlist's videos in insertion order. Deactivated or unpublished
/// members are skipped.
pub async fn list_playlist_videos(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Video>>>> {
    PlaylistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Playlist",
            id,
        }))?;

    let videos = PlaylistRepo::list_videos(&state.pool, id).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// PATCH /api/v1/playlists/{id}
pub async fn update_playlist(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlaylist>,
) -> AppResult<Json<DataResponse<Playlist>>> {
    let playlist = owned_playlist(&state, auth_user.user_id, id).await?;

    let updated = PlaylistRepo::update(&state.pool, playlist.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Playlist",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/playlists/{id}
///
/// Owner-only deactivation. Membership rows stay in place. Returns 204.
pub async fn delete_playlist(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_playlist(&state, auth_user.user_id, id).await?;
    Lifecycle::deactivate_playlist(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/playlists/{id}/videos/{video_id}
///
/// Add a published video to an owned playlist. Idempotent.
pub async fn add_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, video_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    owned_playlist(&state, auth_user.user_id, id).await?;

    let video = VideoRepo::find_by_id(&state.pool, video_id).await?;
    if !video.is_some_and(|v| v.is_published) {
        return Err(AppError::Core(CoreError::InvalidTarget {
            entity: "Video",
            id: video_id,
        }));
    }

    PlaylistRepo::add_video(&state.pool, id, video_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/playlists/{id}/videos/{video_id}
///
/// Remove a video from an owned playlist. Idempotent.
pub async fn remove_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, video_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    owned_playlist(&state, auth_user.user_id, id).await?;
    PlaylistRepo::remove_video(&state.pool, id, video_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a playlist and verify ownership.
async fn owned_playlist(
    state: &AppState,
    actor_id: DbId,
    id: DbId,
) -> AppResult<Playlist> {
    let playlist = PlaylistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Playlist",
            id,
        }))?;
    authorize_owner(actor_id, &playlist).map_err(AppError::Core)?;
    Ok(playlist)
}
