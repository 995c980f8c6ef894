//! Typed client for the Vapi voice-assistant API.
//!
//! Wraps the remote API with one operation per resource verb: list, get,
//! create, update and delete for assistants and phone numbers, list and get
//! for call logs. The flat create/update representations the gateway exposes
//! are translated into Vapi's nested wire schema here — see
//! [`api_types`] for the translation rules.
//!
//! # Example
//!
//! ```no_run
//! use vapi_client::{CreateAssistant, VapiClient, VapiConfig};
//!
//! # async fn example() -> vapi_client::Result<()> {
//! let client = VapiClient::new(
//!     VapiConfig::builder().api_key("vapi-key").build(),
//! )?;
//!
//! let assistant = client
//!     .create_assistant(&CreateAssistant {
//!         name: "Receptionist".to_string(),
//!         prompt: "You answer calls for a dental office.".to_string(),
//!         voice_id: None,
//!         first_message: Some("Thanks for calling!".to_string()),
//!     })
//!     .await?;
//!
//! println!("created {}", assistant["id"]);
//! # Ok(())
//! # }
//! ```

pub mod api_types;
mod client;
mod config;
mod error;

pub use api_types::{
    CreateAssistant, CreatePhoneNumber, UpdateAssistant, UpdatePhoneNumber,
};
pub use client::VapiClient;
pub use config::VapiConfig;
pub use error::{Result, VapiError};
