//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SCORECARD` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use manager_scorecard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Low performance below {}", config.scoring.low_performance_threshold);
//! ```

mod ai;
mod error;
mod scoring;
mod seed;
mod telemetry;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use scoring::ScoringConfig;
pub use seed::SeedConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Alert thresholds and rollup limits
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// AI provider configuration (Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Log level and format
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Initial organisation
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SCORECARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SCORECARD__SCORING__STALE_PLAN_DAYS=45` -> `scoring.stale_plan_days = 45`
    /// - `SCORECARD__AI__ANTHROPIC_API_KEY=...` -> `ai.anthropic_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SCORECARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for thresholds above 100, a zero stale-plan
    /// window, a zero top-alert limit, a zero AI timeout or a blank log level.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring.validate()?;
        self.ai.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
