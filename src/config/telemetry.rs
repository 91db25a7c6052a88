//! Telemetry configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Log output settings. `RUST_LOG` overrides `log_level` when set.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Default filter directive, e.g. `info` or `manager_scorecard=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl TelemetryConfig {
    /// Validate telemetry configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.log_level.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TELEMETRY__LOG_LEVEL"));
        }
        Ok(())
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
