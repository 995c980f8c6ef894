//! Health check route.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Serialize)]
pub struct Health {
    pub status: String,
}

/// Liveness probe.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}
