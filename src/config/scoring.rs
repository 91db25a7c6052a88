//! Scoring and alert threshold configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::alerts::{
    AlertThresholds, DEFAULT_LOW_PERFORMANCE_THRESHOLD, DEFAULT_PILLAR_RISK_THRESHOLD,
    DEFAULT_STALE_PLAN_DAYS,
};

/// Alert thresholds and dashboard limits
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Overall score below which a manager is flagged
    #[serde(default = "default_low_performance")]
    pub low_performance_threshold: u16,

    /// Pillar score below which a pillar is at risk, for pillars whose
    /// template declares no threshold of its own
    #[serde(default = "default_pillar_risk")]
    pub pillar_risk_threshold: u16,

    /// Days an open action plan may go without progress
    #[serde(default = "default_stale_plan_days")]
    pub stale_plan_days: u32,

    /// Alerts shown on the executive rollup
    #[serde(default = "default_top_alerts_limit")]
    pub top_alerts_limit: usize,
}

impl ScoringConfig {
    /// Thresholds for the alert generator. Call after [`validate`](Self::validate).
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            low_performance: clamp_score(self.low_performance_threshold),
            pillar_risk: clamp_score(self.pillar_risk_threshold),
            stale_plan_days: self.stale_plan_days,
        }
    }

    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_threshold("low_performance_threshold", self.low_performance_threshold)?;
        check_threshold("pillar_risk_threshold", self.pillar_risk_threshold)?;

        if self.stale_plan_days == 0 {
            return Err(ValidationError::InvalidStalePlanDays);
        }
        if self.top_alerts_limit == 0 {
            return Err(ValidationError::InvalidTopAlertsLimit);
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            low_performance_threshold: default_low_performance(),
            pillar_risk_threshold: default_pillar_risk(),
            stale_plan_days: default_stale_plan_days(),
            top_alerts_limit: default_top_alerts_limit(),
        }
    }
}

fn check_threshold(field: &'static str, value: u16) -> Result<(), ValidationError> {
    if value > 100 {
        return Err(ValidationError::ThresholdOutOfRange { field, value });
    }
    Ok(())
}

fn clamp_score(value: u16) -> u8 {
    value.min(100) as u8
}

fn default_low_performance() -> u16 {
    u16::from(DEFAULT_LOW_PERFORMANCE_THRESHOLD)
}

fn default_pillar_risk() -> u16 {
    u16::from(DEFAULT_PILLAR_RISK_THRESHOLD)
}

fn default_stale_plan_days() -> u32 {
    DEFAULT_STALE_PLAN_DAYS
}

fn default_top_alerts_limit() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_config_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.low_performance_threshold, 60);
        assert_eq!(config.pillar_risk_threshold, 75);
        assert_eq!(config.stale_plan_days, 30);
        assert_eq!(config.top_alerts_limit, 5);
        assert_eq!(config.thresholds(), AlertThresholds::default());
    }

    #[test]
    fn test_threshold_above_100_rejected() {
        let config = ScoringConfig {
            pillar_risk_threshold: 101,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::ThresholdOutOfRange {
                field: "pillar_risk_threshold",
                value: 101
            })
        );
    }

    #[test]
    fn test_zero_stale_days_rejected() {
        let config = ScoringConfig {
            stale_plan_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidStalePlanDays));
    }

    #[test]
    fn test_zero_top_alerts_rejected() {
        let config = ScoringConfig {
            top_alerts_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTopAlertsLimit));
    }

    #[test]
    fn test_boundary_thresholds_accepted() {
        let config = ScoringConfig {
            low_performance_threshold: 0,
            pillar_risk_threshold: 100,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds().pillar_risk, 100);
    }
}
