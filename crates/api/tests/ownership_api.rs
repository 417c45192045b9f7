//! Integration tests for ownership enforcement and publish visibility.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_video, delete_auth, get, get_auth, patch_json_auth,
    post_auth, post_json_auth, publish_video, register_and_login,
};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_owner_may_update_video(pool: PgPool) {
    let (owner, _) = register_and_login(&pool, "owner").await;
    let (stranger, _) = register_and_login(&pool, "stranger").await;
    let video = publish_video(&pool, &owner, "mine").await;

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/videos/{video}"),
        &stranger,
        serde_json::json!({ "title": "hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/videos/{video}"),
        &owner,
        serde_json::json!({ "title": "renamed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_owner_may_delete_video(pool: PgPool) {
    let (owner, _) = register_and_login(&pool, "owner").await;
    let (stranger, _) = register_and_login(&pool, "stranger").await;
    let video = publish_video(&pool, &owner, "target").await;

    let app = build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/videos/{video}"), &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/videos/{video}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deactivated videos vanish from public reads.
    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/videos/{video}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unpublished_video_visible_only_to_owner(pool: PgPool) {
    let (owner, _) = register_and_login(&pool, "owner").await;
    let (stranger, _) = register_and_login(&pool, "stranger").await;
    let draft = create_video(&pool, &owner, "draft").await;

    let app = build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/videos/{draft}"), &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_published"], false);

    // Strangers and anonymous readers both see 404, not 403; the draft's
    // existence is not disclosed.
    let app = build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/videos/{draft}"), &stranger).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/videos/{draft}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_views_increment_but_owner_views_do_not(pool: PgPool) {
    let (owner, _) = register_and_login(&pool, "owner").await;
    let (viewer, _) = register_and_login(&pool, "viewer").await;
    let video = publish_video(&pool, &owner, "watched").await;

    let app = build_test_app(pool.clone());
    get_auth(app, &format!("/api/v1/videos/{video}"), &owner).await;

    let app = build_test_app(pool.clone());
    get_auth(app, &format!("/api/v1/videos/{video}"), &viewer).await;

    let app = build_test_app(pool.clone());
    get(app, &format!("/api/v1/videos/{video}")).await;

    let app = build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/videos/{video}"), &owner).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["view_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_owner_may_edit_comment(pool: PgPool) {
    let (creator, _) = register_and_login(&pool, "creator").await;
    let (commenter, _) = register_and_login(&pool, "commenter").await;
    let video = publish_video(&pool, &creator, "discussed").await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{video}/comments"),
        &commenter,
        serde_json::json!({ "content": "original" }),
    )
    .await;
    let comment = body_json(response).await["data"]["id"].as_i64().unwrap();

    // The video's creator does not own the comment.
    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/comments/{comment}"),
        &creator,
        serde_json::json!({ "content": "edited by someone else" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/comments/{comment}"),
        &commenter,
        serde_json::json!({ "content": "edited" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "edited");

    let app = build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/comments/{comment}"), &commenter).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_owner_may_manage_tweet(pool: PgPool) {
    let (author, _) = register_and_login(&pool, "author").await;
    let (stranger, _) = register_and_login(&pool, "stranger").await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/tweets",
        &author,
        serde_json::json!({ "content": "my take" }),
    )
    .await;
    let tweet = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/tweets/{tweet}"),
        &stranger,
        serde_json::json!({ "content": "stolen take" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/tweets/{tweet}"), &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/tweets/{tweet}"), &author).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_playlist_mutations_require_ownership(pool: PgPool) {
    let (owner, _) = register_and_login(&pool, "owner").await;
    let (stranger, _) = register_and_login(&pool, "stranger").await;
    let video = publish_video(&pool, &owner, "saved").await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/playlists",
        &owner,
        serde_json::json!({ "name": "favorites", "description": "keepers" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let playlist = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/playlists/{playlist}/videos/{video}"),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Reads are public, but another account cannot modify it.
    let app = build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/playlists/{playlist}"), &stranger).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/playlists/{playlist}"),
        &stranger,
        serde_json::json!({ "name": "not yours" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/playlists/{playlist}/videos/{video}"),
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/playlists/{playlist}/videos"),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_on_unpublished_video_rejected(pool: PgPool) {
    let (owner, _) = register_and_login(&pool, "owner").await;
    let (commenter, _) = register_and_login(&pool, "commenter").await;
    let draft = create_video(&pool, &owner, "draft").await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/videos/{draft}/comments"),
        &commenter,
        serde_json::json!({ "content": "too early" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TARGET");
}
