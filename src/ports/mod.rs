//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Clock` - Current time for ageing and timestamps
//! - `AIProvider` - Text-generation oracle behind the insight handlers

mod ai_provider;
mod clock;

pub use ai_provider::{
    AIError, AIProvider, Citation, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use clock::Clock;
