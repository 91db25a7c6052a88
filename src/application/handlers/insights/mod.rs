//! Insight handlers - the AI summary and conversational collaborators.
//!
//! Both operate on an [`InsightSnapshot`] cloned out of the store and never
//! mutate state. Provider failures and timeouts degrade to fixed fallback
//! text rather than surfacing as errors.

mod ask_assistant;
mod generate_summary;
mod insight;
mod snapshot;

pub use ask_assistant::{AskAssistantCommand, AskAssistantHandler, ASSISTANT_FALLBACK};
pub use generate_summary::{GenerateSummaryCommand, GenerateSummaryHandler, SUMMARY_FALLBACK};
pub use insight::InsightResult;
pub use snapshot::InsightSnapshot;
