//! Threshold configuration for alert rules.

use serde::{Deserialize, Serialize};

/// Default overall score below which a manager is flagged.
pub const DEFAULT_LOW_PERFORMANCE_THRESHOLD: u8 = 60;

/// Default pillar score below which a pillar is at risk.
pub const DEFAULT_PILLAR_RISK_THRESHOLD: u8 = 75;

/// Default number of days an action plan may stay open.
pub const DEFAULT_STALE_PLAN_DAYS: u32 = 30;

/// Numeric cutoffs for the alert rules. Supplied by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub low_performance: u8,
    /// Used for pillars whose template declares no threshold.
    pub pillar_risk: u8,
    pub stale_plan_days: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            low_performance: DEFAULT_LOW_PERFORMANCE_THRESHOLD,
            pillar_risk: DEFAULT_PILLAR_RISK_THRESHOLD,
            stale_plan_days: DEFAULT_STALE_PLAN_DAYS,
        }
    }
}
