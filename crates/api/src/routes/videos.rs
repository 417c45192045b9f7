//! Route definitions for the video catalog.
//!
//! ```text
//! GET    /                      -> list_videos
//! POST   /                      -> create_video
//! GET    /{id}                  -> get_video
//! PATCH  /{id}                  -> update_video
//! DELETE /{id}                  -> delete_video
//! POST   /{id}/toggle-publish   -> toggle_publish
//! GET    /{id}/comments         -> list_comments
//! POST   /{id}/comments         -> create_comment
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(videos::list_videos).post(videos::create_video))
        .route(
            "/{id}",
            get(videos::get_video)
                .patch(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/{id}/toggle-publish", post(videos::toggle_publish))
        .route(
            "/{id}/comments",
            get(videos::list_comments).post(videos::create_comment),
        )
}
