//! Configuration for the Vapi client.

use std::env;

use crate::error::VapiError;

/// Default Vapi API base URL.
pub const DEFAULT_API_URL: &str = "https://api.vapi.ai";

/// Configuration for [`VapiClient`](crate::VapiClient).
#[derive(Debug, Clone)]
pub struct VapiConfig {
    /// Vapi API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,
}

impl Default for VapiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl VapiConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `VAPI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `VAPI_API_URL` - API base URL (default: https://api.vapi.ai)
    pub fn from_env() -> Result<Self, VapiError> {
        let api_key = env::var("VAPI_API_KEY")
            .map_err(|_| VapiError::Configuration("VAPI_API_KEY not set".to_string()))?;

        let api_url = env::var("VAPI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self { api_url, api_key })
    }

    /// Create a new config builder.
    pub fn builder() -> VapiConfigBuilder {
        VapiConfigBuilder::default()
    }
}

/// Builder for [`VapiConfig`].
#[derive(Debug, Default)]
pub struct VapiConfigBuilder {
    config: VapiConfig,
}

impl VapiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> VapiConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VapiConfig::default();
        assert_eq!(config.api_url, "https://api.vapi.ai");
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = VapiConfig::builder()
            .api_key("test-key")
            .api_url("https://vapi.test")
            .build();

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.api_url, "https://vapi.test");
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_vapi_vars() {
            std::env::remove_var("VAPI_API_KEY");
            std::env::remove_var("VAPI_API_URL");
        }

        // Missing API key should error
        clear_vapi_vars();
        let result = VapiConfig::from_env();
        assert!(matches!(result, Err(VapiError::Configuration(_))));

        // Only API key set, default URL used
        clear_vapi_vars();
        std::env::set_var("VAPI_API_KEY", "env-key");
        let config = VapiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.api_url, "https://api.vapi.ai");

        // Both set
        std::env::set_var("VAPI_API_URL", "https://vapi.test");
        let config = VapiConfig::from_env().unwrap();
        assert_eq!(config.api_url, "https://vapi.test");

        clear_vapi_vars();
    }
}
