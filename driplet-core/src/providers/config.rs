//! Provider configuration

use crate::providers::error::{ProviderError, ProviderResult};
use serde_json::{Map, Value};

/// Environment variable consulted by [`ProviderConfig::from_env`]
const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for a provider client
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key used for bearer authentication
    pub api_key: String,

    /// Base URL of the API (no trailing slash)
    pub base_url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Open-ended pass-through parameters merged into the request body
    /// (temperature, max_tokens, or anything else the provider accepts)
    pub params: Map<String, Value>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create a configuration with defaults for everything but key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            params: Map::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the API key from the environment
    pub fn from_env(model: impl Into<String>) -> ProviderResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            ProviderError::Configuration(format!("{} is not set", API_KEY_ENV))
        })?;
        Ok(Self::new(api_key, model))
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set one pass-through parameter
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
