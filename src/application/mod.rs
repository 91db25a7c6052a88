//! Application layer - the state store, seed loading and insight handlers.
//!
//! The store is the single write path into application state. Handlers
//! read snapshots of that state and talk to outbound ports.

pub mod handlers;
pub mod seed;
pub mod store;

pub use handlers::{
    AskAssistantCommand, AskAssistantHandler, GenerateSummaryCommand, GenerateSummaryHandler,
    InsightResult, InsightSnapshot,
};
pub use seed::{SeedDocument, SeedError};
pub use store::{AppState, Command, DispatchOutcome, StateStore, StoreError, ViewMode};
