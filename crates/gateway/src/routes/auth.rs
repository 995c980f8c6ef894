//! Registration and login routes.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::{GatewayError, Result};
use crate::state::AppState;

/// Registration request.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Registration response.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub access_token: String,
}

/// Login request.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
}

/// Register a new user.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    if req.email.is_empty()
        || req.username.is_empty()
        || req.password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err(GatewayError::Validation(
            "All fields are required".to_string(),
        ));
    }

    if req.password != req.confirm_password {
        return Err(GatewayError::Validation(
            "Passwords do not match".to_string(),
        ));
    }

    let existing = database::user::get_user_by_email(state.db.pool(), &req.email).await?;
    if existing.is_some() {
        return Err(GatewayError::Validation(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let user =
        database::user::create_user(state.db.pool(), &req.email, &req.username, &password_hash)
            .await?;

    info!(user_id = %user.id, "User registered");

    let access_token = issue_token(&user.email, &state.jwt_encoding_key, state.token_ttl_minutes)?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        access_token,
    }))
}

/// Log in with email and password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(GatewayError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user = database::user::get_user_by_email(state.db.pool(), &req.email).await?;

    let authenticated = match &user {
        Some(user) => verify_password(&req.password, &user.password_hash)?,
        None => false,
    };

    if !authenticated {
        return Err(GatewayError::Validation(
            "Invalid email or password".to_string(),
        ));
    }

    info!(email = %req.email, "User logged in");

    let access_token = issue_token(&req.email, &state.jwt_encoding_key, state.token_ttl_minutes)?;

    Ok(Json(LoginResponse {
        message: "User logged in successfully".to_string(),
        access_token,
        token_type: "bearer".to_string(),
    }))
}
