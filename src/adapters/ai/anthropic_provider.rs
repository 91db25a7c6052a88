//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_max_retries(2);
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```
//!
//! # Web search
//!
//! When a request sets `web_search`, the server-side web search tool is
//! attached and `web_search_result_location` citations on text blocks are
//! collected (deduplicated by URL) into the response's sources.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{
    AIError, AIProvider, Citation, CompletionRequest, CompletionResponse, FinishReason,
    MessageRole, ProviderInfo, TokenUsage,
};

/// Default model when none is configured.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

/// Default API endpoint.
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
const WEB_SEARCH_MAX_USES: u32 = 3;
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to Anthropic's format.
    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| AnthropicMessage {
                role: match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            })
            .collect();

        let tools = if request.web_search {
            vec![AnthropicTool {
                tool_type: WEB_SEARCH_TOOL_TYPE.to_string(),
                name: "web_search".to_string(),
                max_uses: WEB_SEARCH_MAX_USES,
            }]
        } else {
            Vec::new()
        };

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
            tools,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&self.to_anthropic_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(parse_retry_after(&error_body))),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(request).await?;
        let response = Self::handle_response_status(response).await?;
        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;
        Ok(into_completion(body))
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;
        loop {
            match self.attempt(&request).await {
                Ok(completion) => {
                    debug!(
                        trace_id = %request.trace_id,
                        model = %completion.model,
                        tokens = completion.usage.total_tokens,
                        sources = completion.sources.len(),
                        "anthropic completion received"
                    );
                    return Ok(completion);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    warn!(
                        trace_id = %request.trace_id,
                        attempt = retry_count + 1,
                        error = %err,
                        "anthropic request failed, retrying"
                    );
                    // Exponential backoff: 1s, 2s, 4s, ...
                    sleep(Duration::from_secs(1 << retry_count)).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model).with_web_search(true)
    }
}

/// Converts an API response into our completion type.
fn into_completion(response: AnthropicResponse) -> CompletionResponse {
    let mut content = String::new();
    let mut sources = Vec::new();
    let mut seen = HashSet::new();

    for block in response.content {
        if block.block_type != "text" {
            continue;
        }
        if let Some(text) = block.text {
            content.push_str(&text);
        }
        for citation in block.citations {
            let Some(uri) = citation.url else { continue };
            if seen.insert(uri.clone()) {
                sources.push(Citation {
                    title: citation.title.unwrap_or_else(|| uri.clone()),
                    uri,
                });
            }
        }
    }

    let finish_reason = match response.stop_reason.as_deref() {
        Some("max_tokens") => FinishReason::Length,
        Some("refusal") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    CompletionResponse {
        content: content.trim().to_string(),
        sources,
        usage: TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens),
        model: response.model,
        finish_reason,
    }
}

/// Parses "try again in Ns" from an error body, defaulting to 60s.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
            let rest = &message[message.find("try again in ")? + 13..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .unwrap_or(60)
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<AnthropicTool>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct AnthropicTool {
    #[serde(rename = "type")]
    tool_type: String,
    name: String,
    max_uses: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
    #[serde(default)]
    citations: Vec<TextCitation>,
}

#[derive(Debug, Deserialize)]
struct TextCitation {
    url: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(config: AnthropicConfig) -> AnthropicProvider {
        AnthropicProvider::new(config).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = AnthropicConfig::new("test-key")
            .with_model("claude-3-haiku-20240307")
            .with_base_url("https://custom.api.com/")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5);

        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
        assert_eq!(provider(config).messages_url(), "https://custom.api.com/v1/messages");
    }

    #[test]
    fn request_without_web_search_has_no_tools() {
        let provider = provider(AnthropicConfig::new("k"));
        let request = CompletionRequest::new("t")
            .with_system_prompt("Be brief")
            .with_message(MessageRole::User, "Summarise Ada");
        let json = serde_json::to_value(provider.to_anthropic_request(&request)).unwrap();

        assert_eq!(json["system"], "Be brief");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], DEFAULT_MAX_TOKENS);
        assert!(json.get("tools").is_none());
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn request_with_web_search_attaches_tool() {
        let provider = provider(AnthropicConfig::new("k"));
        let request = CompletionRequest::new("t")
            .with_message(MessageRole::User, "Industry turnover benchmarks?")
            .with_web_search(true);
        let json = serde_json::to_value(provider.to_anthropic_request(&request)).unwrap();

        assert_eq!(json["tools"][0]["type"], WEB_SEARCH_TOOL_TYPE);
        assert_eq!(json["tools"][0]["name"], "web_search");
    }

    #[test]
    fn response_collects_text_and_unique_citations() {
        let body = r#"{
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 120, "output_tokens": 40},
            "content": [
                {"type": "server_tool_use", "id": "x", "name": "web_search", "input": {}},
                {"type": "text", "text": "Turnover averages 12%. ", "citations": [
                    {
                        "type": "web_search_result_location",
                        "url": "https://a.example",
                        "title": "Report A",
                        "cited_text": "12%"
                    }
                ]},
                {"type": "text", "text": "Retention improves with coaching.", "citations": [
                    {
                        "type": "web_search_result_location",
                        "url": "https://a.example",
                        "title": "Report A",
                        "cited_text": "..."
                    },
                    {
                        "type": "web_search_result_location",
                        "url": "https://b.example",
                        "cited_text": "..."
                    }
                ]}
            ]
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(body).unwrap();
        let completion = into_completion(parsed);

        assert_eq!(
            completion.content,
            "Turnover averages 12%. Retention improves with coaching."
        );
        assert_eq!(completion.sources.len(), 2);
        assert_eq!(completion.sources[0].title, "Report A");
        assert_eq!(completion.sources[1].title, "https://b.example");
        assert_eq!(completion.usage.total_tokens, 160);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn max_tokens_stop_maps_to_length() {
        let body = r#"{
            "model": "m",
            "stop_reason": "max_tokens",
            "usage": {"input_tokens": 1, "output_tokens": 1},
            "content": [{"type": "text", "text": "cut"}]
        }"#;
        let completion = into_completion(serde_json::from_str(body).unwrap());
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert!(completion.sources.is_empty());
    }

    #[test]
    fn parse_retry_after_reads_message_or_defaults() {
        let hinted = r#"{"error":{"message":"Rate limited, try again in 12s"}}"#;
        assert_eq!(parse_retry_after(hinted), 12);

        let plain = r#"{"error":{"message":"Rate limit exceeded"}}"#;
        assert_eq!(parse_retry_after(plain), 60);
        assert_eq!(parse_retry_after("not json"), 60);
    }

    #[test]
    fn provider_info_advertises_web_search() {
        let info = provider(AnthropicConfig::new("k")).provider_info();
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.model, DEFAULT_ANTHROPIC_MODEL);
        assert!(info.supports_web_search);
    }
}
