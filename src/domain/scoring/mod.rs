//! Scoring Module - Pure domain services turning recorded KPI values into
//! normalized scores.
//!
//! # Components
//!
//! - `resolve_value` - Picks or aggregates the KPI value for a reporting window
//! - `ScoreCalculator` - KPI, pillar and overall scores (weighted, round half-up)
//!
//! Nothing here performs I/O; all functions are deterministic over their input.

mod calculator;
mod period_aggregator;

pub use calculator::ScoreCalculator;
pub use period_aggregator::{resolve_value, ReportingWindow};
