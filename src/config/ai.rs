//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{AnthropicConfig, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL};

/// AI provider configuration
///
/// The provider is optional: without an API key the insight handlers run
/// against the offline mock provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Model used for summaries and the assistant
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds, also the insight deadline
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Allow the assistant to use web search
    #[serde(default)]
    pub web_search: bool,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Adapter configuration, if an API key is present
    pub fn anthropic(&self) -> Option<AnthropicConfig> {
        if !self.has_anthropic() {
            return None;
        }
        self.anthropic_api_key.as_ref().map(|key| {
            AnthropicConfig::new(key.trim())
                .with_model(&self.model)
                .with_base_url(&self.base_url)
                .with_timeout(self.timeout())
                .with_max_retries(self.max_retries)
        })
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            web_search: false,
        }
    }
}

fn default_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_ANTHROPIC_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}
