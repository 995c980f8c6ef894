//! Vapi API request types and the flat-to-nested translation layer.
//!
//! The gateway exposes a flattened schema to its clients (`prompt`,
//! `voiceId`); Vapi expects a deeply nested one (a chat-model block carrying
//! a system message, a voice-provider block). The translation is lossless in
//! the forward direction for every field declared here, and absent fields
//! are omitted rather than serialized as nulls so PATCH bodies keep partial
//! update semantics.

use serde::{Deserialize, Serialize};

/// Default chat-model provider for new assistants.
pub const DEFAULT_MODEL_PROVIDER: &str = "openai";
/// Default chat model for new assistants.
pub const DEFAULT_MODEL: &str = "gpt-4";
/// Default voice provider for new assistants.
pub const DEFAULT_VOICE_PROVIDER: &str = "11labs";
/// Default voice id for new assistants.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
/// Default telephony provider for new phone numbers.
pub const DEFAULT_PHONE_PROVIDER: &str = "byo-phone-number";

/// Flat representation of an assistant to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssistant {
    /// Display name.
    pub name: String,
    /// System prompt for the chat model.
    pub prompt: String,
    /// Voice id, falls back to [`DEFAULT_VOICE_ID`].
    #[serde(rename = "voiceId")]
    pub voice_id: Option<String>,
    /// Greeting spoken when a call connects.
    #[serde(rename = "firstMessage")]
    pub first_message: Option<String>,
}

/// Flat partial update of an assistant. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssistant {
    pub name: Option<String>,
    pub prompt: Option<String>,
    #[serde(rename = "voiceId")]
    pub voice_id: Option<String>,
    #[serde(rename = "firstMessage")]
    pub first_message: Option<String>,
}

impl UpdateAssistant {
    /// True when no field is present (nothing to send upstream).
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.prompt.is_none()
            && self.voice_id.is_none()
            && self.first_message.is_none()
    }
}

/// Flat representation of a phone number to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePhoneNumber {
    /// Telephony provider, falls back to [`DEFAULT_PHONE_PROVIDER`].
    pub provider: Option<String>,
    /// The number in E.164 form.
    pub number: String,
    #[serde(rename = "credentialId")]
    pub credential_id: Option<String>,
    /// Assistant to route inbound calls to.
    pub assistant_id: Option<String>,
}

/// Flat partial update of a phone number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePhoneNumber {
    pub number: Option<String>,
    #[serde(rename = "credentialId")]
    pub credential_id: Option<String>,
    /// Reassign inbound routing to a different assistant.
    pub assistant_id: Option<String>,
}

/// Nested chat-model block in Vapi's wire schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub messages: Vec<SystemMessage>,
}

impl ModelConfig {
    /// The default chat model carrying `prompt` as its system message.
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            provider: DEFAULT_MODEL_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            messages: vec![SystemMessage {
                role: "system".to_string(),
                content: prompt.into(),
            }],
        }
    }
}

/// A system message inside the chat-model block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMessage {
    pub role: String,
    pub content: String,
}

/// Nested voice block in Vapi's wire schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub provider: String,
    #[serde(rename = "voiceId")]
    pub voice_id: String,
}

impl VoiceConfig {
    /// The default voice provider with the given voice id.
    pub fn with_voice_id(voice_id: impl Into<String>) -> Self {
        Self {
            provider: DEFAULT_VOICE_PROVIDER.to_string(),
            voice_id: voice_id.into(),
        }
    }
}

/// Assistant create/update body in Vapi's wire schema.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssistantPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceConfig>,
    #[serde(rename = "firstMessage", skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,
}

impl AssistantPayload {
    /// Translate a flat create request. Every field is populated, using the
    /// documented defaults where the flat form left them out.
    pub fn from_create(request: &CreateAssistant) -> Self {
        let voice_id = request
            .voice_id
            .clone()
            .unwrap_or_else(|| DEFAULT_VOICE_ID.to_string());

        Self {
            name: Some(request.name.clone()),
            model: Some(ModelConfig::with_system_prompt(request.prompt.clone())),
            voice: Some(VoiceConfig::with_voice_id(voice_id)),
            first_message: request.first_message.clone(),
        }
    }

    /// Translate a flat partial update. Only the fields present in the flat
    /// form appear in the wire body.
    pub fn from_update(request: &UpdateAssistant) -> Self {
        Self {
            name: request.name.clone(),
            model: request
                .prompt
                .clone()
                .map(ModelConfig::with_system_prompt),
            voice: request.voice_id.clone().map(VoiceConfig::with_voice_id),
            first_message: request.first_message.clone(),
        }
    }
}

/// Phone number create/update body in Vapi's wire schema.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhoneNumberPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "credentialId", skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(rename = "assistantId", skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<String>,
}

impl PhoneNumberPayload {
    /// Translate a flat create request.
    pub fn from_create(request: &CreatePhoneNumber) -> Self {
        Self {
            provider: Some(
                request
                    .provider
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PHONE_PROVIDER.to_string()),
            ),
            number: Some(request.number.clone()),
            credential_id: request.credential_id.clone(),
            assistant_id: request.assistant_id.clone(),
        }
    }

    /// Translate a flat partial update, omitting absent fields.
    pub fn from_update(request: &UpdatePhoneNumber) -> Self {
        Self {
            provider: None,
            number: request.number.clone(),
            credential_id: request.credential_id.clone(),
            assistant_id: request.assistant_id.clone(),
        }
    }
}
