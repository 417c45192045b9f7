use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cliptube_core::error::CoreError;
use cliptube_db::toggle::ToggleError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`ToggleError`] for toggle-engine
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cliptube_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A toggle-engine error from `cliptube_db`.
    #[error(transparent)]
    Toggle(#[from] ToggleError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidTarget { entity, id } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_TARGET",
                    format!("{entity} with id {id} does not exist or is inactive"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::NotOwner { entity, id } => (
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    format!("Not permitted to modify {entity} with id {id}"),
                ),
                CoreError::SelfReference => (
                    StatusCode::CONFLICT,
                    "SELF_REFERENCE",
                    "A channel cannot subscribe to itself".to_string(),
                ),
                CoreError::CounterDesync { entity, id } => {
                    tracing::error!(entity = %entity, id = %id, "counter desync reached the API boundary");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "COUNTER_DESYNC",
                        "An internal error occurred".to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Toggle-engine errors ---
            AppError::Toggle(toggle) => match toggle {
                ToggleError::InvalidTarget { entity, id } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_TARGET",
                    format!("{entity} with id {id} does not exist or is inactive"),
                ),
                ToggleError::SelfReference => (
                    StatusCode::CONFLICT,
                    "SELF_REFERENCE",
                    "A channel cannot subscribe to itself".to_string(),
                ),
                ToggleError::CounterDesync { entity, id } => {
                    tracing::error!(entity = %entity, id = %id, "counter desync reached the API boundary");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "COUNTER_DESYNC",
                        "An internal error occurred".to_string(),
                    )
                }
                ToggleError::Database(err) => classify_sqlx_error(err),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
