//! Route definitions for like toggles and counter reads.
//!
//! ```text
//! GET  /videos                 -> list_liked_videos
//! POST /videos/{id}            -> toggle_video_like
//! GET  /videos/{id}/count      -> video_like_count
//! POST /comments/{id}          -> toggle_comment_like
//! GET  /comments/{id}/count    -> comment_like_count
//! POST /tweets/{id}            -> toggle_tweet_like
//! GET  /tweets/{id}/count      -> tweet_like_count
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::likes;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos", get(likes::list_liked_videos))
        .route("/videos/{id}", post(likes::toggle_video_like))
        .route("/videos/{id}/count", get(likes::video_like_count))
        .route("/comments/{id}", post(likes::toggle_comment_like))
        .route("/comments/{id}/count", get(likes::comment_like_count))
        .route("/tweets/{id}", post(likes::toggle_tweet_like))
        .route("/tweets/{id}/count", get(likes::tweet_like_count))
}
