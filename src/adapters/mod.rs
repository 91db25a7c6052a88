//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - AI provider implementations (mock, Anthropic)
//! - `clock` - System and fixed clocks

pub mod ai;
mod clock;

pub use ai::{AnthropicConfig, AnthropicProvider, MockAIProvider};
pub use clock::{FixedClock, SystemClock};
