//! Integration tests for channel subscriptions over HTTP.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{body_json, build_test_app, get, get_auth, post_auth, register_and_login};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscription_toggles_and_counts(pool: PgPool) {
    let (_, channel_id) = register_and_login(&pool, "channel").await;
    let (fan, _) = register_and_login(&pool, "fan").await;

    let app = build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/subscriptions/{channel_id}"), &fan).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["now_active"], true);

    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/subscriptions/{channel_id}/count")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);

    // The denormalized count also shows on the public profile.
    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/users/{channel_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["subscriber_count"], 1);

    // Toggling again unsubscribes.
    let app = build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/subscriptions/{channel_id}"), &fan).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["now_active"], false);

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/subscriptions/{channel_id}/count")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_subscription_is_rejected(pool: PgPool) {
    let (token, user_id) = register_and_login(&pool, "narcissist").await;

    let app = build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/subscriptions/{user_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SELF_REFERENCE");

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/subscriptions/{user_id}/count")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscribing_to_missing_channel_is_invalid_target(pool: PgPool) {
    let (fan, _) = register_and_login(&pool, "fan").await;

    let app = build_test_app(pool);
    let response = post_auth(app, "/api/v1/subscriptions/999999", &fan).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TARGET");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscriber_listing(pool: PgPool) {
    let (_, channel_id) = register_and_login(&pool, "channel").await;
    let (first_fan, first_id) = register_and_login(&pool, "first_fan").await;
    let (second_fan, second_id) = register_and_login(&pool, "second_fan").await;

    for fan in [&first_fan, &second_fan] {
        let app = build_test_app(pool.clone());
        post_auth(app, &format!("/api/v1/subscriptions/{channel_id}"), fan).await;
    }

    let app = build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/subscriptions/{channel_id}/subscribers"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    // Newest subscription first.
    assert_eq!(ids, vec![second_id, first_id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_my_subscriptions_listing(pool: PgPool) {
    let (_, first_channel) = register_and_login(&pool, "chan_one").await;
    let (_, second_channel) = register_and_login(&pool, "chan_two").await;
    let (fan, _) = register_and_login(&pool, "fan").await;

    for channel in [first_channel, second_channel] {
        let app = build_test_app(pool.clone());
        post_auth(app, &format!("/api/v1/subscriptions/{channel}"), &fan).await;
    }

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/subscriptions", &fan).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second_channel, first_channel]);

    // Unsubscribing shrinks the listing.
    let app = build_test_app(pool.clone());
    post_auth(app, &format!("/api/v1/subscriptions/{first_channel}"), &fan).await;

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/subscriptions", &fan).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscription_listing_requires_auth(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/subscriptions").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
