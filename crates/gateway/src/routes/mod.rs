//! Route handlers for the gateway.

pub mod assistants;
pub mod auth;
pub mod calls;
pub mod health;
pub mod phone_numbers;

#[cfg(test)]
mod tests;

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Authentication
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Assistants
        .route("/assistants", get(assistants::list))
        .route("/assistants", post(assistants::create))
        .route("/assistants/:assistant_id", get(assistants::get_by_id))
        .route("/assistants/:assistant_id", patch(assistants::update))
        .route("/assistants/:assistant_id", delete(assistants::remove))
        // Phone numbers
        .route("/phone-numbers", get(phone_numbers::list))
        .route("/phone-numbers", post(phone_numbers::create))
        .route("/phone-numbers/:phone_id", get(phone_numbers::get_by_id))
        .route("/phone-numbers/:phone_id", patch(phone_numbers::update))
        .route("/phone-numbers/:phone_id", delete(phone_numbers::remove))
        // Calls and messages
        .route("/calls", get(calls::list))
        .route("/calls/:call_id", get(calls::get_by_id))
        .route("/messages", get(calls::messages))
}
