//! Assistant routes.
//!
//! Every operation is mediated by the ownership table: listing walks the
//! caller's rows, mutations verify the row exists first, and create inserts
//! one after the provider accepts.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use vapi_client::{CreateAssistant, UpdateAssistant, VapiError};

use crate::error::{GatewayError, Result};
use crate::extract::CurrentUser;
use crate::ownership::require_owned;
use crate::state::AppState;

/// Acknowledgement for a completed delete.
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// List the caller's assistants.
///
/// Walks the ownership rows and fetches each assistant by id. Rows the
/// provider no longer recognizes are pruned and omitted from the result,
/// so a provider-side delete heals the local table on the next read.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Value>>> {
    let rows = database::user_assistant::list_for_user(state.db.pool(), &user.id).await?;

    if rows.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let mut assistants = Vec::with_capacity(rows.len());
    for row in rows {
        match state.vapi.get_assistant(&row.assistant_id).await {
            Ok(assistant) => assistants.push(assistant),
            Err(VapiError::Api { status, .. }) if (400..500).contains(&status) => {
                warn!(
                    assistant_id = %row.assistant_id,
                    status,
                    "Assistant gone upstream, pruning ownership row"
                );
                database::user_assistant::delete(state.db.pool(), &user.id, &row.assistant_id)
                    .await?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(Json(assistants))
}

/// Fetch one of the caller's assistants by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(assistant_id): Path<String>,
) -> Result<Json<Value>> {
    require_owned(&state.db, &user.id, &assistant_id).await?;

    let assistant = state.vapi.get_assistant(&assistant_id).await?;
    Ok(Json(assistant))
}

/// Create an assistant and record the caller as its owner.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateAssistant>,
) -> Result<Json<Value>> {
    let assistant = state.vapi.create_assistant(&req).await?;

    let assistant_id = assistant
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::Internal("Provider response missing assistant id".to_string()))?;
    let assistant_name = assistant
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Unknown Assistant");

    // If this insert fails the remote assistant is orphaned; no compensating
    // remote delete is attempted.
    database::user_assistant::insert(state.db.pool(), &user.id, assistant_id, assistant_name)
        .await?;

    info!(user_id = %user.id, assistant_id, "Assistant created");

    Ok(Json(assistant))
}

/// Update one of the caller's assistants.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(assistant_id): Path<String>,
    Json(req): Json<UpdateAssistant>,
) -> Result<Json<Value>> {
    require_owned(&state.db, &user.id, &assistant_id).await?;

    let assistant = state.vapi.update_assistant(&assistant_id, &req).await?;

    if let Some(name) = &req.name {
        database::user_assistant::update_name(state.db.pool(), &user.id, &assistant_id, name)
            .await?;
    }

    Ok(Json(assistant))
}

/// Delete one of the caller's assistants.
///
/// The local row is removed only after the remote delete succeeds; a failed
/// remote delete leaves the ownership table untouched.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(assistant_id): Path<String>,
) -> Result<Json<DeletedResponse>> {
    require_owned(&state.db, &user.id, &assistant_id).await?;

    state.vapi.delete_assistant(&assistant_id).await?;

    database::user_assistant::delete(state.db.pool(), &user.id, &assistant_id).await?;

    info!(user_id = %user.id, assistant_id = %assistant_id, "Assistant deleted");

    Ok(Json(DeletedResponse {
        message: "Assistant deleted successfully".to_string(),
    }))
}
