//! Voicegate: ownership-mediated gateway for the Vapi voice-assistant API.
//!
//! Authenticates end users, forwards their requests to Vapi, and projects
//! Vapi's flat resource model into a per-user view via a local ownership
//! table.

mod auth;
mod config;
mod error;
mod extract;
mod ownership;
mod routes;
mod state;

use database::Database;
use tower_http::cors::CorsLayer;
use tracing::info;
use vapi_client::VapiClient;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting gateway");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Connect to the provider
    let vapi = VapiClient::from_env()?;

    // Build application state
    let state = AppState::new(db, vapi, &config.secret_key, config.token_ttl_minutes);

    // Build router
    let app = routes::router()
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Gateway listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
