//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be between 0 and 100, got {value}")]
    ThresholdOutOfRange { field: &'static str, value: u16 },

    #[error("stale_plan_days must be at least 1")]
    InvalidStalePlanDays,

    #[error("top_alerts_limit must be at least 1")]
    InvalidTopAlertsLimit,

    #[error("Invalid AI request timeout")]
    InvalidTimeout,

    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),
}
