//! Handlers for the `/tweets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cliptube_core::error::CoreError;
use cliptube_core::ownership::authorize_owner;
use cliptube_core::types::DbId;
use cliptube_db::lifecycle::Lifecycle;
use cliptube_db::models::tweet::{CreateTweet, Tweet};
use cliptube_db::repositories::TweetRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating or editing a tweet.
#[derive(Debug, Deserialize)]
pub struct TweetRequest {
    pub content: String,
}

/// POST /api/v1/tweets
pub async fn create_tweet(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<TweetRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Tweet>>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Tweet content must not be empty".into(),
        )));
    }

    let tweet = TweetRepo::create(
        &state.pool,
        &CreateTweet {
            owner_id: auth_user.user_id,
            content: input.content,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: tweet })))
}

/// GET /api/v1/tweets
///
/// The authenticated user's own tweets, newest first.
pub async fn list_my_tweets(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Tweet>>>> {
    let tweets = TweetRepo::list_by_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: tweets }))
}

/// GET /api/v1/tweets/{id}
pub async fn get_tweet(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Tweet>>> {
    let tweet = TweetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tweet",
            id,
        }))?;
    Ok(Json(DataResponse { data: tweet }))
}

/// PATCH /api/v1/tweets/{id}
pub async fn update_tweet(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<TweetRequest>,
) -> AppResult<Json<DataResponse<Tweet>>> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Tweet content must not be empty".into(),
        )));
    }

    let tweet = TweetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tweet",
            id,
        }))?;
    authorize_owner(auth_user.user_id, &tweet).map_err(AppError::Core)?;

    let updated = TweetRepo::update_content(&state.pool, id, &input.content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tweet",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/tweets/{id}
///
/// Owner-only deactivation. Returns 204.
pub async fn delete_tweet(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let tweet = TweetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tweet",
            id,
        }))?;
    authorize_owner(auth_user.user_id, &tweet).map_err(AppError::Core)?;

    Lifecycle::deactivate_tweet(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
