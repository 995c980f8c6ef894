//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use jsonwebtoken::{DecodingKey, EncodingKey};
use vapi_client::VapiClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Identity store.
    pub db: Database,
    /// Provider client.
    pub vapi: Arc<VapiClient>,
    /// JWT signing key.
    pub jwt_encoding_key: EncodingKey,
    /// JWT verification key.
    pub jwt_decoding_key: DecodingKey,
    /// Access token time-to-live, in minutes.
    pub token_ttl_minutes: i64,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, vapi: VapiClient, secret_key: &str, token_ttl_minutes: i64) -> Self {
        Self {
            db,
            vapi: Arc::new(vapi),
            jwt_encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            jwt_decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            token_ttl_minutes,
        }
    }
}
