//! Command-line entry point: seeds the store and prints the dashboards.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};

use manager_scorecard::adapters::{AnthropicProvider, MockAIProvider, SystemClock};
use manager_scorecard::application::handlers::{GenerateSummaryCommand, GenerateSummaryHandler};
use manager_scorecard::application::{InsightSnapshot, SeedDocument};
use manager_scorecard::config::AppConfig;
use manager_scorecard::domain::catalog::RoleCatalog;
use manager_scorecard::ports::AIProvider;
use manager_scorecard::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.telemetry)?;

    let seed = SeedDocument::load(config.seed.path())?;
    let store = seed.into_store(
        RoleCatalog::standard(),
        config.scoring.thresholds(),
        Arc::new(SystemClock),
    )?;
    let state = store.state();
    info!(
        managers = state.managers().len(),
        alerts = state.alerts().len(),
        reporting_month = %state.reporting_month(),
        "store seeded"
    );

    let rollup = state.rollup(config.scoring.top_alerts_limit);
    println!("{}", serde_json::to_string_pretty(&rollup)?);
    println!("{}", serde_json::to_string_pretty(state.alerts())?);

    let Some(first) = state.managers().first() else {
        return Ok(());
    };
    let Some(snapshot) = InsightSnapshot::of_manager(state, first.id()) else {
        return Ok(());
    };

    let provider: Arc<dyn AIProvider> = match config.ai.anthropic() {
        Some(anthropic) => Arc::new(AnthropicProvider::new(anthropic)?),
        None => {
            warn!("no AI provider configured, using offline mock");
            Arc::new(MockAIProvider::new())
        }
    };

    let handler = GenerateSummaryHandler::new(provider, config.ai.timeout());
    let summary = handler
        .handle(GenerateSummaryCommand {
            manager_id: *first.id(),
            snapshot,
        })
        .await;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
