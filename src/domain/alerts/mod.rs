//! Alerts module - derived notifications over manager data.
//!
//! The alert collection is never edited directly. It is regenerated from
//! scratch after every state change and reconciled against the previous
//! collection so that a persisting condition keeps its id and read flag.
//!
//! # Rules (evaluated in this order per manager)
//!
//! - `LowPerformance` - overall score below the configured threshold
//! - `PillarRisk` - a pillar scored below its risk threshold
//! - `StaleActionPlan` - an open plan older than the configured age

mod alert;
mod generator;
mod thresholds;

pub use alert::{Alert, AlertCandidate, AlertKey, AlertKind, AlertSeverity, AlertSubject};
pub use generator::AlertGenerator;
pub use thresholds::{
    AlertThresholds, DEFAULT_LOW_PERFORMANCE_THRESHOLD, DEFAULT_PILLAR_RISK_THRESHOLD,
    DEFAULT_STALE_PLAN_DAYS,
};
