//! Handlers for the `/auth` resource (register, login, refresh, logout).
//!
//! Tokens travel two ways at once: in the JSON body for API clients and as
//! HTTP-only cookies for browser clients. The refresh endpoint accepts either
//! form and rotates the refresh token on every use.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::AppendHeaders;
use axum::Json;
use cliptube_core::error::CoreError;
use cliptube_db::models::user::{CreateUser, UserProfile};
use cliptube_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{cookie_value, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Auth cookie headers attached to login/refresh/logout responses.
type AuthCookies = AppendHeaders<Vec<(axum::http::HeaderName, String)>>;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Optional request body for `POST /auth/refresh` (cookie takes precedence).
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserProfile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new channel account. Username and email uniqueness is enforced by
/// the storage constraints; a duplicate surfaces as 409.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserProfile>>)> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }
    if !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Email address is not valid".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: input.email.clone(),
            full_name: input.full_name.clone(),
            password_hash,
            avatar_key: None,
            cover_image_key: None,
        },
    )
    .await?;

    tracing::info!(user_id = created.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: created.into(),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens in
/// the body and as HTTP-only cookies.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<(AuthCookies, Json<DataResponse<AuthResponse>>)> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    issue_tokens(&state, user).await
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token (cookie or body) for new access + refresh
/// tokens. The old refresh token is invalidated (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RefreshRequest>, axum::extract::rejection::JsonRejection>,
) -> AppResult<(AuthCookies, Json<DataResponse<AuthResponse>>)> {
    // Browser clients send no body at all; a missing or malformed body is
    // fine as long as the cookie is present.
    let token = cookie_value(&headers, "refresh_token")
        .or_else(|| body.ok().and_then(|Json(b)| b.refresh_token))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing refresh token".into()))
        })?;

    let token_hash = hash_refresh_token(&token);

    let user = UserRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    issue_tokens(&state, user).await
}

/// POST /api/v1/auth/logout
///
/// Invalidate the stored refresh token and clear auth cookies. Returns 204.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<(StatusCode, AuthCookies)> {
    UserRepo::set_refresh_token_hash(&state.pool, auth_user.user_id, None).await?;

    let headers = AppendHeaders(vec![
        (SET_COOKIE, clear_cookie("access_token")),
        (SET_COOKIE, clear_cookie("refresh_token")),
    ]);
    Ok((StatusCode::NO_CONTENT, headers))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist the refresh hash, and build the
/// response with auth cookies.
async fn issue_tokens(
    state: &AppState,
    user: cliptube_db::models::user::User,
) -> AppResult<(AuthCookies, Json<DataResponse<AuthResponse>>)> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    UserRepo::set_refresh_token_hash(&state.pool, user.id, Some(&refresh_hash)).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;
    let refresh_max_age = state.config.jwt.refresh_token_expiry_days * 24 * 3600;

    let headers = AppendHeaders(vec![
        (
            SET_COOKIE,
            auth_cookie("access_token", &access_token, expires_in),
        ),
        (
            SET_COOKIE,
            auth_cookie("refresh_token", &refresh_plaintext, refresh_max_age),
        ),
    ]);

    Ok((
        headers,
        Json(DataResponse {
            data: AuthResponse {
                access_token,
                refresh_token: refresh_plaintext,
                expires_in,
                user: user.into(),
            },
        }),
    ))
}

/// Build an HTTP-only auth cookie with the given lifetime in seconds.
fn auth_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// Build a cookie that expires immediately, clearing `name` on the client.
fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
