//! Handlers for the `/likes` resource.
//!
//! Every mutation here is a toggle routed through the toggle engine; there is
//! deliberately no separate "like" and "unlike" endpoint pair. Counts are read
//! from the denormalized ledger column, never by scanning relations.

use axum::extract::{Path, State};
use axum::Json;
use cliptube_core::types::{DbId, RelationKind};
use cliptube_db::models::video::Video;
use cliptube_db::repositories::VideoRepo;
use cliptube_db::toggle::{ToggleEngine, ToggleOutcome};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Counter read response.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// POST /api/v1/likes/videos/{id}
///
/// Toggle the caller's like on a video. Liking one's own video is allowed.
pub async fn toggle_video_like(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ToggleOutcome>>> {
    let outcome =
        ToggleEngine::toggle(&state.pool, auth_user.user_id, RelationKind::VideoLike, id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/likes/videos/{id}/count
pub async fn video_like_count(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CountResponse>>> {
    let count = ToggleEngine::count(&state.pool, RelationKind::VideoLike, id).await?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// POST /api/v1/likes/comments/{id}
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ToggleOutcome>>> {
    let outcome =
        ToggleEngine::toggle(&state.pool, auth_user.user_id, RelationKind::CommentLike, id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/likes/comments/{id}/count
pub async fn comment_like_count(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CountResponse>>> {
    let count = ToggleEngine::count(&state.pool, RelationKind::CommentLike, id).await?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// POST /api/v1/likes/tweets/{id}
pub async fn toggle_tweet_like(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ToggleOutcome>>> {
    let outcome =
        ToggleEngine::toggle(&state.pool, auth_user.user_id, RelationKind::TweetLike, id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/likes/tweets/{id}/count
pub async fn tweet_like_count(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CountResponse>>> {
    let count = ToggleEngine::count(&state.pool, RelationKind::TweetLike, id).await?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// GET /api/v1/likes/videos
///
/// Videos the caller has liked, newest like first.
pub async fn list_liked_videos(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Video>>>> {
    let videos = VideoRepo::list_liked_by(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: videos }))
}
