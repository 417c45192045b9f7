//! Route definitions for playlists and membership.
//!
//! ```text
//! GET    /                          -> list_my_playlists
//! POST   /                          -> create_playlist
//! GET    /{id}                      -> get_playlist
//! PATCH  /{id}                      -> update_playlist
//! DELETE /{id}                      -> delete_playlist
//! GET    /{id}/videos               -> list_playlist_videos
//! POST   /{id}/videos/{video_id}    -> add_video
//! DELETE /{id}/videos/{video_id}    -> remove_video
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::playlists;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(playlists::list_my_playlists).post(playlists::create_playlist),
        )
        .route(
            "/{id}",
            get(playlists::get_playlist)
                .patch(playlists::update_playlist)
                .delete(playlists::delete_playlist),
        )
        .route("/{id}/videos", get(playlists::list_playlist_videos))
        .route(
            "/{id}/videos/{video_id}",
            post(playlists::add_video).delete(playlists::remove_video),
        )
}
