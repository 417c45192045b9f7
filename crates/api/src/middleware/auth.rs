//! JWT-based authentication extractor for Axum handlers.
//!
//! The access token is read from the `access_token` cookie first, falling back
//! to an `Authorization: Bearer <token>` header, so both browser clients (with
//! HTTP-only cookies) and API clients work.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use cliptube_core::error::CoreError;
use cliptube_core::types::DbId;
use cliptube_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the access token.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

/// Extract a named cookie's value from request headers.
///
/// Handles multiple `Cookie` headers and multiple `name=value` pairs per
/// header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
        .next()
}

/// Pull the access token out of the request: cookie first, then Bearer header.
fn extract_access_token(parts: &Parts) -> Option<String> {
    if let Some(token) = cookie_value(&parts.headers, "access_token") {
        return Some(token);
    }
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_access_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing access token (cookie or Authorization header)".into(),
            ))
        })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // A token can outlive its account: deactivation must take effect
        // immediately, not at access-token expiry.
        if !UserRepo::is_active(&state.pool, claims.sub).await? {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Account is deactivated".into(),
            )));
        }

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

// `Option<AuthUser>` on public endpoints that behave differently for the
// entity's owner (for example an unpublished video). An invalid token or a
// deactivated account is treated the same as no token.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let claims = extract_access_token(parts)
            .and_then(|token| validate_token(&token, &state.config.jwt).ok());
        let user = match claims {
            Some(claims) => UserRepo::is_active(&state.pool, claims.sub)
                .await
                .unwrap_or(false)
                .then_some(AuthUser {
                    user_id: claims.sub,
                }),
            None => None,
        };
        Ok(user)
    }
}
