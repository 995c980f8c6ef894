//! Error types for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use database::DatabaseError;
use vapi_client::VapiError;

/// Errors that can occur while handling a request.
///
/// Resource-level denials and true absences share one variant: a caller
/// probing another user's assistant id learns nothing beyond "not found".
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed, missing or mismatched input.
    #[error("{0}")]
    Validation(String),

    /// Missing, expired or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource absent, or present but not owned by the caller.
    #[error("{0} not found or access denied")]
    NotFoundOrDenied(&'static str),

    /// Identity store failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Provider rejected the request or could not be reached.
    #[error(transparent)]
    Upstream(#[from] VapiError),

    /// Password hashing failure.
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            GatewayError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            GatewayError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            GatewayError::NotFoundOrDenied(_) => (StatusCode::NOT_FOUND, self.to_string()),
            GatewayError::Database(DatabaseError::AlreadyExists { .. }) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            GatewayError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            GatewayError::Upstream(err) => {
                tracing::warn!("Upstream error: {}", err);
                (upstream_status(err), err.to_string())
            }
            GatewayError::PasswordHash(err) => {
                tracing::error!("Password hashing error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            GatewayError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "detail": detail
        });

        (status, Json(body)).into_response()
    }
}

/// Provider 4xx statuses pass through; provider 5xx and transport failures
/// map to 500.
fn upstream_status(err: &VapiError) -> StatusCode {
    match err.status() {
        Some(status @ 400..=499) => {
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Result type for gateway handlers.
pub type Result<T> = std::result::Result<T, GatewayError>;
