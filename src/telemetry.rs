//! Tracing subscriber initialisation for the binary.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': {source}")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("telemetry error: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// # Errors
///
/// Fails if the configured filter does not parse or a subscriber is
/// already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    installed.map_err(TelemetryError::Subscriber)
}

fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_builds_a_filter() {
        let config = TelemetryConfig {
            log_level: "manager_scorecard=debug,warn".to_string(),
            json: false,
        };
        if std::env::var("RUST_LOG").is_err() {
            assert!(env_filter(&config).is_ok());
        }
    }

    #[test]
    fn malformed_level_is_reported() {
        let config = TelemetryConfig {
            log_level: "manager_scorecard=notalevel".to_string(),
            json: false,
        };
        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(
                env_filter(&config),
                Err(TelemetryError::EnvFilter { .. })
            ));
        }
    }
}
