//! Call log and message routes.
//!
//! Calls are read-only through the gateway; the provider owns their
//! lifecycle. Ownership is transitive through each call's `assistantId`.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{Map, Value};

use crate::error::{GatewayError, Result};
use crate::extract::CurrentUser;
use crate::ownership::{assistant_id_of, owned_assistant_ids};
use crate::state::AppState;

/// List the calls handled by the caller's assistants.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Value>>> {
    let owned = owned_assistant_ids(&state.db, &user.id).await?;

    let calls = state.vapi.list_calls().await?;
    let filtered = calls
        .into_iter()
        .filter(|call| assistant_id_of(call).is_some_and(|id| owned.contains(id)))
        .collect();

    Ok(Json(filtered))
}

/// Fetch a specific call, if it was handled by a caller-owned assistant.
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(call_id): Path<String>,
) -> Result<Json<Value>> {
    let owned = owned_assistant_ids(&state.db, &user.id).await?;

    let call = state.vapi.get_call(&call_id).await?;

    let is_owned = assistant_id_of(&call).is_some_and(|id| owned.contains(id));
    if !is_owned {
        return Err(GatewayError::NotFoundOrDenied("Call"));
    }

    Ok(Json(call))
}

/// Group the caller's call transcripts by assistant name.
///
/// Returns a mapping from the cached assistant name to the list of message
/// batches its calls produced. The name lookup is computed from the current
/// ownership rows on every request.
pub async fn messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Map<String, Value>>> {
    let rows = database::user_assistant::list_for_user(state.db.pool(), &user.id).await?;

    if rows.is_empty() {
        return Ok(Json(Map::new()));
    }

    let name_of: std::collections::HashMap<&str, &str> = rows
        .iter()
        .map(|ua| (ua.assistant_id.as_str(), ua.assistant_name.as_str()))
        .collect();

    let calls = state.vapi.list_calls().await?;

    let mut by_assistant = Map::new();
    for call in &calls {
        let Some(assistant_id) = assistant_id_of(call) else {
            continue;
        };
        let Some(name) = name_of.get(assistant_id) else {
            continue;
        };

        let chat = call.get("messages").cloned().unwrap_or_else(|| Value::Array(Vec::new()));

        if let Value::Array(batches) = by_assistant
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            batches.push(chat);
        }
    }

    Ok(Json(by_assistant))
}
