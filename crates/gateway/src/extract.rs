//! Request extractors.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use database::User;

use crate::auth;
use crate::error::GatewayError;
use crate::state::AppState;

/// The authenticated user making this request.
///
/// Verifies the bearer token and re-resolves the subject email against the
/// identity store on every request; a valid token whose user row has since
/// disappeared is rejected the same as a bad token.
pub struct CurrentUser(pub User);

/// Extract the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            GatewayError::Unauthorized("Missing authorization header".to_string())
        })?;

        let claims = auth::verify_token(token, &state.jwt_decoding_key)?;

        let user = database::user::get_user_by_email(state.db.pool(), &claims.sub)
            .await?
            .ok_or_else(|| GatewayError::Unauthorized("User not found".to_string()))?;

        Ok(CurrentUser(user))
    }
}
