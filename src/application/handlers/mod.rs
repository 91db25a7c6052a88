//! Application handlers.
//!
//! Handlers that orchestrate calls to external collaborators on top of
//! store snapshots.

pub mod insights;

pub use insights::{
    AskAssistantCommand, AskAssistantHandler, GenerateSummaryCommand, GenerateSummaryHandler,
    InsightResult, InsightSnapshot,
};
