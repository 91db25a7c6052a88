//! Manager Scorecard - performance scoring for organisational managers
//!
//! Managers are scored against role-specific pillars of weighted KPIs.
//! A single state store owns the organisation, recomputes alerts on every
//! change and exposes manager scorecards and the executive rollup. An
//! optional AI collaborator produces narrative summaries and answers
//! questions about the current state.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
