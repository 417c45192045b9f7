//! Route definitions for comment edit/deactivate.
//!
//! Creation and listing live under `/videos/{id}/comments`.
//!
//! ```text
//! PATCH  /{id}   -> update_comment
//! DELETE /{id}   -> delete_comment
//! ```

use axum::routing::patch;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        patch(comments::update_comment).delete(comments::delete_comment),
    )
}
