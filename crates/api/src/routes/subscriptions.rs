//! Route definitions for channel subscriptions.
//!
//! ```text
//! GET  /                              -> list_my_subscriptions
//! POST /{channel_id}                  -> toggle_subscription
//! GET  /{channel_id}/count            -> subscriber_count
//! GET  /{channel_id}/subscribers      -> list_subscribers
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subscriptions::list_my_subscriptions))
        .route("/{channel_id}", post(subscriptions::toggle_subscription))
        .route("/{channel_id}/count", get(subscriptions::subscriber_count))
        .route(
            "/{channel_id}/subscribers",
            get(subscriptions::list_subscribers),
        )
}
