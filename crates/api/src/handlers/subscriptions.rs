//! Handlers for the `/subscriptions` resource.
//!
//! Subscriptions are the one relation kind with a self-reference rule: a
//! channel cannot subscribe to itself. The toggle engine enforces it; here it
//! just surfaces as 409 SELF_REFERENCE.

use axum::extract::{Path, State};
use axum::Json;
use cliptube_core::types::{DbId, RelationKind};
use cliptube_db::models::user::UserProfile;
use cliptube_db::repositories::UserRepo;
use cliptube_db::toggle::{ToggleEngine, ToggleOutcome};

use crate::error::AppResult;
use crate::handlers::likes::CountResponse;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/subscriptions/{channel_id}
///
/// Toggle the caller's subscription to a channel.
pub async fn toggle_subscription(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(channel_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ToggleOutcome>>> {
    let outcome = ToggleEngine::toggle(
        &state.pool,
        auth_user.user_id,
        RelationKind::Subscription,
        channel_id,
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/subscriptions/{channel_id}/count
pub async fn subscriber_count(
    State(state): State<AppState>,
    Path(channel_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CountResponse>>> {
    let count = ToggleEngine::count(&state.pool, RelationKind::Subscription, channel_id).await?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// GET /api/v1/subscriptions/{channel_id}/subscribers
///
/// Public profiles of a channel's subscribers, newest first.
pub async fn list_subscribers(
    State(state): State<AppState>,
    Path(channel_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<UserProfile>>>> {
    let subscribers = UserRepo::list_subscribers(&state.pool, channel_id).await?;
    Ok(Json(DataResponse { data: subscribers }))
}

/// GET /api/v1/subscriptions
///
/// Channels the caller subscribes to, newest first.
pub async fn list_my_subscriptions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserProfile>>>> {
    let channels = UserRepo::list_subscribed_channels(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: channels }))
}
