//! Integration tests for the authentication endpoints.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, get_auth, post_auth, post_json, post_json_auth, register_and_login,
};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_created_profile(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "username": "newcomer",
            "email": "newcomer@example.com",
            "password": "long-enough-password",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "newcomer");
    assert!(json["data"]["id"].as_i64().is_some());
    assert!(
        json["data"].get("password_hash").is_none(),
        "profile payload must not leak the password hash"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_username_conflicts(pool: PgPool) {
    register_and_login(&pool, "taken").await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "username": "taken",
            "email": "other@example.com",
            "password": "long-enough-password",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_short_password(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "username": "hasty",
            "email": "hasty@example.com",
            "password": "short",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_invalid_email(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "username": "typo",
            "email": "not-an-email",
            "password": "long-enough-password",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_sets_auth_cookies(pool: PgPool) {
    register_and_login(&pool, "browser").await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({
            "username": "browser",
            "password": "hunter2-but-longer",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));
    assert!(
        cookies.iter().all(|c| c.contains("HttpOnly")),
        "auth cookies must be HTTP-only"
    );

    let json = body_json(response).await;
    assert!(json["data"]["access_token"].as_str().is_some());
    assert!(json["data"]["refresh_token"].as_str().is_some());
    assert_eq!(json["data"]["expires_in"], 15 * 60);
    assert_eq!(json["data"]["user"]["username"], "browser");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_is_unauthorized(pool: PgPool) {
    register_and_login(&pool, "careful").await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({
            "username": "careful",
            "password": "definitely-wrong",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_user_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({
            "username": "ghost",
            "password": "hunter2-but-longer",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_the_refresh_token(pool: PgPool) {
    register_and_login(&pool, "rotator").await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({
            "username": "rotator",
            "password": "hunter2-but-longer",
        }),
    )
    .await;
    let login = body_json(response).await;
    let first_refresh = login["data"]["refresh_token"].as_str().unwrap().to_string();

    // Exchange it once.
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": first_refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    let second_refresh = refreshed["data"]["refresh_token"].as_str().unwrap();
    assert_ne!(second_refresh, first_refresh, "refresh must rotate");

    // The spent token no longer works.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": first_refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_without_token_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/refresh", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_clears_cookies_and_invalidates_refresh(pool: PgPool) {
    let (token, _) = register_and_login(&pool, "leaver").await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({
            "username": "leaver",
            "password": "hunter2-but-longer",
        }),
    )
    .await;
    let login = body_json(response).await;
    let refresh_token = login["data"]["refresh_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("access_token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=;")));

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (token, user_id) = register_and_login(&pool, "holder").await;
    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_from_cookie_is_accepted(pool: PgPool) {
    let (token, user_id) = register_and_login(&pool, "cookiefan").await;

    let app = build_test_app(pool);
    let request = axum::http::Request::builder()
        .method(axum::http::Method::GET)
        .uri("/api/v1/users/me")
        .header(axum::http::header::COOKIE, format!("access_token={token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_account_token_is_rejected(pool: PgPool) {
    let (token, _) = register_and_login(&pool, "quitter").await;

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone());
    let response = common::delete_auth(app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The access token is still within its lifetime, but the account is gone.
    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/tweets",
        &token,
        serde_json::json!({ "content": "posting from beyond" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_then_post_content(pool: PgPool) {
    let (token, _) = register_and_login(&pool, "poster").await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/tweets",
        &token,
        serde_json::json!({ "content": "hello from the new account" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "hello from the new account");
}
