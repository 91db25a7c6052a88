//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! - `MockAIProvider` - Queued responses for tests and offline runs
//! - `AnthropicProvider` - Anthropic Messages API with optional web search

mod anthropic_provider;
mod mock_provider;

pub use anthropic_provider::{
    AnthropicConfig, AnthropicProvider, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL,
};
pub use mock_provider::MockAIProvider;
