//! Phone number routes.
//!
//! Phone numbers belong to a user only transitively, through the assistant
//! they route calls to. Single-resource operations fetch from the provider
//! first (the id alone reveals nothing about ownership), then check the
//! resource's assistant association against the caller's ownership rows.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use vapi_client::{CreatePhoneNumber, UpdatePhoneNumber};

use crate::error::Result;
use crate::extract::CurrentUser;
use crate::ownership::{assert_owned, assistant_id_of, owned_assistant_ids};
use crate::state::AppState;

/// Acknowledgement for a completed delete.
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// List the phone numbers routed to the caller's assistants.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Value>>> {
    let owned = owned_assistant_ids(&state.db, &user.id).await?;

    let phone_numbers = state.vapi.list_phone_numbers().await?;
    let filtered = phone_numbers
        .into_iter()
        .filter(|pn| assistant_id_of(pn).is_some_and(|id| owned.contains(id)))
        .collect();

    Ok(Json(filtered))
}

/// Fetch a specific phone number, if it routes to a caller-owned assistant.
///
/// Numbers with no assistant association pass through: there is no owner to
/// check against.
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(phone_id): Path<String>,
) -> Result<Json<Value>> {
    let phone_number = state.vapi.get_phone_number(&phone_id).await?;

    if let Some(assistant_id) = assistant_id_of(&phone_number) {
        assert_owned(&state.db, &user.id, assistant_id, "Phone number").await?;
    }

    Ok(Json(phone_number))
}

/// Create a phone number, optionally routed to a caller-owned assistant.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreatePhoneNumber>,
) -> Result<Json<Value>> {
    if let Some(assistant_id) = &req.assistant_id {
        assert_owned(&state.db, &user.id, assistant_id, "Assistant").await?;
    }

    let phone_number = state.vapi.create_phone_number(&req).await?;

    info!(user_id = %user.id, "Phone number created");

    Ok(Json(phone_number))
}

/// Update a phone number routed to a caller-owned assistant.
///
/// A reassignment must target an assistant the caller also owns, checked
/// before the provider call executes.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(phone_id): Path<String>,
    Json(req): Json<UpdatePhoneNumber>,
) -> Result<Json<Value>> {
    let phone_number = state.vapi.get_phone_number(&phone_id).await?;
    let current_assistant_id = assistant_id_of(&phone_number);

    if let Some(assistant_id) = current_assistant_id {
        assert_owned(&state.db, &user.id, assistant_id, "Phone number").await?;
    }

    if let Some(new_assistant_id) = &req.assistant_id {
        if current_assistant_id != Some(new_assistant_id.as_str()) {
            assert_owned(&state.db, &user.id, new_assistant_id, "New assistant").await?;
        }
    }

    let updated = state.vapi.update_phone_number(&phone_id, &req).await?;
    Ok(Json(updated))
}

/// Delete a phone number routed to a caller-owned assistant.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(phone_id): Path<String>,
) -> Result<Json<DeletedResponse>> {
    let phone_number = state.vapi.get_phone_number(&phone_id).await?;

    if let Some(assistant_id) = assistant_id_of(&phone_number) {
        assert_owned(&state.db, &user.id, assistant_id, "Phone number").await?;
    }

    state.vapi.delete_phone_number(&phone_id).await?;

    info!(user_id = %user.id, phone_id = %phone_id, "Phone number deleted");

    Ok(Json(DeletedResponse {
        message: "Phone number deleted successfully".to_string(),
    }))
}
