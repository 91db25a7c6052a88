//! State Store - the single mutation path for application state.
//!
//! # Components
//!
//! - `AppState` - managers, selection, view, period and derived alerts
//! - `Command` - everything a caller may ask the store to do
//! - `StateStore` - applies commands atomically and recomputes alerts
//! - `StoreError` - validation and not-found rejections

mod command;
mod errors;
mod state;
mod state_store;

pub use command::{AlertDelta, Command, CommandKind, DispatchOutcome, StoreEvent};
pub use errors::{Notice, StoreError};
pub use state::{AppState, ViewMode};
pub use state_store::StateStore;
