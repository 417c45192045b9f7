//! Route definitions for accounts and public channel pages.
//!
//! ```text
//! GET    /me            -> get_me
//! PATCH  /me            -> update_me
//! DELETE /me            -> deactivate_me
//! GET    /{id}          -> get_channel
//! GET    /{id}/videos   -> list_channel_videos
//! GET    /{id}/tweets   -> list_channel_tweets
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(users::get_me)
                .patch(users::update_me)
                .delete(users::deactivate_me),
        )
        .route("/{id}", get(users::get_channel))
        .route("/{id}/videos", get(users::list_channel_videos))
        .route("/{id}/tweets", get(users::list_channel_tweets))
}
