//! Handlers for the `/comments` resource (edit and deactivate).
//!
//! Creation and listing live under `/videos/{id}/comments`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cliptube_core::error::CoreError;
use cliptube_core::ownership::authorize_owner;
use cliptube_core::types::DbId;
use cliptube_db::lifecycle::Lifecycle;
use cliptube_db::models::comment::Comment;
use cliptube_db::repositories::CommentRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for editing a comment.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// PATCH /api/v1/comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCommentRequest>,
) -> AppResult<Json<DataResponse<Comment>>> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment content must not be empty".into(),
        )));
    }

    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    authorize_owner(auth_user.user_id, &comment).map_err(AppError::Core)?;

    let updated = CommentRepo::update_content(&state.pool, id, &input.content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/comments/{id}
///
/// Owner-only deactivation. The comment's like counter freezes; its relations
/// stay in the store. Returns 204.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    authorize_owner(auth_user.user_id, &comment).map_err(AppError::Core)?;

    Lifecycle::deactivate_comment(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
