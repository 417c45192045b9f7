//! Handlers for the `/videos` resource, including a video's comments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cliptube_core::error::CoreError;
use cliptube_core::ownership::authorize_owner;
use cliptube_core::types::DbId;
use cliptube_db::lifecycle::Lifecycle;
use cliptube_db::models::comment::{Comment, CreateComment};
use cliptube_db::models::video::{CreateVideo, UpdateVideo, Video};
use cliptube_db::repositories::{CommentRepo, VideoRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Pagination query parameters with clamped defaults.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    /// Clamp to sane bounds: limit in 1..=100 (default 20), offset >= 0.
    pub fn clamped(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(20).clamp(1, 100);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Request body for creating a comment.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// GET /api/v1/videos
///
/// Published videos, newest first, paginated.
pub async fn list_videos(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<DataResponse<Vec<Video>>>> {
    let (limit, offset) = pagination.clamped();
    let videos = VideoRepo::list_published(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// POST /api/v1/videos
///
/// Publish a new video. The media is uploaded to the object store separately;
/// this records its handles and metadata.
pub async fn create_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateVideo>,
) -> AppResult<(StatusCode, Json<DataResponse<Video>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }

    let video = VideoRepo::create(&state.pool, auth_user.user_id, &input).await?;
    tracing::info!(video_id = video.id, owner_id = video.owner_id, "video created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// GET /api/v1/videos/{id}
///
/// Public video read. Unpublished videos are visible only to their owner;
/// everyone else sees 404. Public fetches record a view.
pub async fn get_video(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Video>>> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;

    let is_owner = viewer.is_some_and(|v| v.user_id == video.owner_id);
    if !video.is_published && !is_owner {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }));
    }

    if !is_owner {
        VideoRepo::increment_view_count(&state.pool, id).await?;
    }

    Ok(Json(DataResponse { data: video }))
}

/// PATCH /api/v1/videos/{id}
///
/// Owner-only metadata update. Counter columns are not updatable here.
pub async fn update_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<Json<DataResponse<Video>>> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    authorize_owner(auth_user.user_id, &video).map_err(AppError::Core)?;

    let updated = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/videos/{id}
///
/// Owner-only deactivation: soft-deletes the video and its comments, enqueues
/// its blobs for release. Returns 204.
pub async fn delete_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    authorize_owner(auth_user.user_id, &video).map_err(AppError::Core)?;

    Lifecycle::deactivate_video(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/videos/{id}/toggle-publish
///
/// Owner-only publish flip. Unpublished videos stop accepting likes but keep
/// their counter value.
pub async fn toggle_publish(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Video>>> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    authorize_owner(auth_user.user_id, &video).map_err(AppError::Core)?;

    let updated = VideoRepo::toggle_publish(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/videos/{id}/comments
///
/// A video's comments, newest first, paginated.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    // 404 for unknown videos rather than an empty list.
    VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;

    let (limit, offset) = pagination.clamped();
    let comments = CommentRepo::list_by_video(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/videos/{id}/comments
///
/// Comment on a published video. Commenting on a missing, deactivated, or
/// unpublished video is rejected as an invalid target.
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment content must not be empty".into(),
        )));
    }

    let video = VideoRepo::find_by_id(&state.pool, id).await?;
    if !video.is_some_and(|v| v.is_published) {
        return Err(AppError::Core(CoreError::InvalidTarget {
            entity: "Video",
            id,
        }));
    }

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            video_id: id,
            owner_id: auth_user.user_id,
            content: input.content,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
