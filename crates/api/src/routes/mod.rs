pub mod auth;
pub mod comments;
pub mod health;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                              register (public)
/// /auth/login                                 login (public)
/// /auth/refresh                               refresh (public, cookie or body)
/// /auth/logout                                logout (requires auth)
///
/// /users/me                                   get, update, deactivate own account
/// /users/{id}                                 public channel profile
/// /users/{id}/videos                          channel's published videos
/// /users/{id}/tweets                          channel's tweets
///
/// /videos                                     list published, create
/// /videos/{id}                                get, update, deactivate
/// /videos/{id}/toggle-publish                 flip publish flag (POST)
/// /videos/{id}/comments                       list, create
///
/// /comments/{id}                              update, deactivate
///
/// /tweets                                     list own, create
/// /tweets/{id}                                get, update, deactivate
///
/// /playlists                                  list own, create
/// /playlists/{id}                             get, update, deactivate
/// /playlists/{id}/videos                      list members
/// /playlists/{id}/videos/{video_id}           add, remove member
///
/// /likes/videos                               videos the caller liked (GET)
/// /likes/videos/{id}                          toggle like (POST)
/// /likes/videos/{id}/count                    like count (GET)
/// /likes/comments/{id}                        toggle like (POST)
/// /likes/comments/{id}/count                  like count (GET)
/// /likes/tweets/{id}                          toggle like (POST)
/// /likes/tweets/{id}/count                    like count (GET)
///
/// /subscriptions                              channels the caller follows (GET)
/// /subscriptions/{channel_id}                 toggle subscription (POST)
/// /subscriptions/{channel_id}/count           subscriber count (GET)
/// /subscriptions/{channel_id}/subscribers     subscriber profiles (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Own account and public channel pages.
        .nest("/users", users::router())
        // Video catalog and per-video comments.
        .nest("/videos", videos::router())
        // Comment edit/deactivate (creation lives under /videos).
        .nest("/comments", comments::router())
        // Channel micro-posts.
        .nest("/tweets", tweets::router())
        // Playlists and membership.
        .nest("/playlists", playlists::router())
        // Like toggles and counter reads.
        .nest("/likes", likes::router())
        // Subscription toggles, counts, and listings.
        .nest("/subscriptions", subscriptions::router())
}
