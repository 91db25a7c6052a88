//! AI Provider Port - Interface for the text-generation oracle.
//!
//! Insight handlers use this port to produce performance summaries and
//! conversational answers. The port is read-only with respect to
//! application state: a provider only ever sees the prompt it is handed.
//!
//! # Design
//!
//! - Single non-streaming completion call
//! - Optional web search, surfaced as citations on the response
//! - Error types for common failure modes (rate limits, outages, bad payloads)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for AI/LLM provider interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Get provider information (name, model, capabilities).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for AI completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Conversation messages (history + current user message).
    pub messages: Vec<Message>,
    /// System prompt to guide model behavior.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Allow the provider to ground its answer with a web search.
    pub web_search: bool,
    /// Trace ID for log correlation.
    pub trace_id: String,
}

impl CompletionRequest {
    /// Creates an empty request tagged with a trace id.
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            web_search: false,
            trace_id: trace_id.into(),
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Enables or disables web search.
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of the message sender. System instructions travel separately in
/// [`CompletionRequest::system_prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Response from AI completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Web sources the answer was grounded on, if any.
    pub sources: Vec<Citation>,
    /// Token usage.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    /// A plain text response with no sources.
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sources: Vec::new(),
            usage: TokenUsage::default(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }

    pub fn with_sources(mut self, sources: Vec<Citation>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }
}

/// A web source cited by a response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    /// An error occurred.
    Error,
}

/// Provider information and capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "anthropic", "mock").
    pub name: String,
    /// Model identifier.
    pub model: String,
    /// Whether the provider honours `web_search`.
    pub supports_web_search: bool,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            supports_web_search: false,
        }
    }

    pub fn with_web_search(mut self, supports: bool) -> Self {
        self.supports_web_search = supports;
        self
    }
}

/// AI provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key missing or rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
