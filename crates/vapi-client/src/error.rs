//! Provider client error types.

use thiserror::Error;

/// Errors that can occur talking to the Vapi API.
#[derive(Debug, Error)]
pub enum VapiError {
    /// Client misconfiguration (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("failed to reach Vapi API: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider rejected the request.
    #[error("Vapi API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl VapiError {
    /// Provider HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            VapiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, VapiError>;
