//! Route definitions for channel micro-posts.
//!
//! ```text
//! GET    /       -> list_my_tweets
//! POST   /       -> create_tweet
//! GET    /{id}   -> get_tweet
//! PATCH  /{id}   -> update_tweet
//! DELETE /{id}   -> delete_tweet
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::tweets;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tweets::list_my_tweets).post(tweets::create_tweet))
        .route(
            "/{id}",
            get(tweets::get_tweet)
                .patch(tweets::update_tweet)
                .delete(tweets::delete_tweet),
        )
}
