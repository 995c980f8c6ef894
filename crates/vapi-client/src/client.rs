//! VapiClient implementation.

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api_types::{
    AssistantPayload, CreateAssistant, CreatePhoneNumber, PhoneNumberPayload, UpdateAssistant,
    UpdatePhoneNumber,
};
use crate::config::VapiConfig;
use crate::error::{Result, VapiError};

/// A thin client for the Vapi voice-assistant API.
///
/// Resources come back as raw JSON objects: the gateway forwards them to its
/// own clients unchanged and only ever reads `id`, `name` and `assistantId`
/// out of them. Requests the gateway originates are typed and translated in
/// [`crate::api_types`]. No call is retried; errors carry the provider's
/// status and body for the caller to surface.
pub struct VapiClient {
    client: Client,
    config: VapiConfig,
}

impl VapiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: VapiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| VapiError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`VapiConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self> {
        Self::new(VapiConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &VapiConfig {
        &self.config
    }

    // Assistants

    /// Fetch all assistants visible to the API key.
    pub async fn list_assistants(&self) -> Result<Vec<Value>> {
        let data = self.request(Method::GET, "/assistant", None::<&()>).await?;
        Ok(normalize_list(data))
    }

    /// Fetch a specific assistant by id.
    pub async fn get_assistant(&self, assistant_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("/assistant/{}", assistant_id), None::<&()>)
            .await
    }

    /// Create an assistant from the flat local representation.
    pub async fn create_assistant(&self, request: &CreateAssistant) -> Result<Value> {
        let payload = AssistantPayload::from_create(request);
        self.request(Method::POST, "/assistant", Some(&payload)).await
    }

    /// Apply a partial update, sending only the fields present in `request`.
    pub async fn update_assistant(
        &self,
        assistant_id: &str,
        request: &UpdateAssistant,
    ) -> Result<Value> {
        let payload = AssistantPayload::from_update(request);
        self.request(
            Method::PATCH,
            &format!("/assistant/{}", assistant_id),
            Some(&payload),
        )
        .await
    }

    /// Delete an assistant.
    pub async fn delete_assistant(&self, assistant_id: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &format!("/assistant/{}", assistant_id),
            None::<&()>,
        )
        .await
    }

    // Phone numbers

    /// Fetch all phone numbers visible to the API key.
    pub async fn list_phone_numbers(&self) -> Result<Vec<Value>> {
        let data = self
            .request(Method::GET, "/phone-number", None::<&()>)
            .await?;
        Ok(normalize_list(data))
    }

    /// Fetch a specific phone number by id.
    pub async fn get_phone_number(&self, phone_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/phone-number/{}", phone_id),
            None::<&()>,
        )
        .await
    }

    /// Create a phone number from the flat local representation.
    pub async fn create_phone_number(&self, request: &CreatePhoneNumber) -> Result<Value> {
        let payload = PhoneNumberPayload::from_create(request);
        self.request(Method::POST, "/phone-number", Some(&payload))
            .await
    }

    /// Apply a partial update, sending only the fields present in `request`.
    pub async fn update_phone_number(
        &self,
        phone_id: &str,
        request: &UpdatePhoneNumber,
    ) -> Result<Value> {
        let payload = PhoneNumberPayload::from_update(request);
        self.request(
            Method::PATCH,
            &format!("/phone-number/{}", phone_id),
            Some(&payload),
        )
        .await
    }

    /// Delete a phone number.
    pub async fn delete_phone_number(&self, phone_id: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &format!("/phone-number/{}", phone_id),
            None::<&()>,
        )
        .await
    }

    // Calls

    /// Fetch all call logs visible to the API key.
    pub async fn list_calls(&self) -> Result<Vec<Value>> {
        let data = self.request(Method::GET, "/call", None::<&()>).await?;
        Ok(normalize_list(data))
    }

    /// Fetch a specific call by id.
    pub async fn get_call(&self, call_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("/call/{}", call_id), None::<&()>)
            .await
    }

    /// Make a request to the Vapi API and parse the JSON body.
    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.api_url, path);
        debug!(%method, %url, "Sending request to Vapi API");

        let mut builder = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Vapi API rejected request");
            return Err(VapiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        serde_json::from_str(&text).map_err(|e| VapiError::Api {
            status: status.as_u16(),
            message: format!("Failed to parse response body: {}", e),
        })
    }
}

/// Normalize a degenerate result set.
///
/// The provider is inconsistent about returning an object vs. a one-element
/// collection; callers expecting a list always get one.
fn normalize_list(data: Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        other => vec![other],
    }
}
