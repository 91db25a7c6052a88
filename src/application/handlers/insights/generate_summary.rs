//! GenerateSummaryHandler - narrative performance summary for one manager.

use std::sync::Arc;
use std::time::Duration;

use super::insight::{complete_or_fallback, InsightResult};
use super::InsightSnapshot;
use crate::domain::foundation::ManagerId;
use crate::ports::{AIProvider, CompletionRequest, MessageRole};

/// Shown when the summary cannot be produced.
pub const SUMMARY_FALLBACK: &str =
    "The AI performance summary is unavailable right now. Scores and alerts above are up to date.";

const SUMMARY_SYSTEM_PROMPT: &str = "You are an HR performance analyst. Using only the JSON \
scorecard provided, write a concise summary of 3 to 5 sentences for the named manager: overall \
standing, strongest and weakest pillars, any active alerts, and one concrete next step. A null \
score means no data was recorded; say so rather than treating it as zero.";

const SUMMARY_MAX_TOKENS: u32 = 600;

/// Command to summarise one manager.
#[derive(Debug, Clone)]
pub struct GenerateSummaryCommand {
    pub manager_id: ManagerId,
    /// Snapshot taken from the store, normally via `InsightSnapshot::of_manager`.
    pub snapshot: InsightSnapshot,
}

/// Handler for summary requests.
pub struct GenerateSummaryHandler {
    provider: Arc<dyn AIProvider>,
    timeout: Duration,
}

impl GenerateSummaryHandler {
    pub fn new(provider: Arc<dyn AIProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Produces the summary, or the fallback text with `degraded` set.
    ///
    /// Dropping the returned future cancels the provider call.
    pub async fn handle(&self, cmd: GenerateSummaryCommand) -> InsightResult {
        let Some(scorecard) = cmd
            .snapshot
            .scorecards
            .iter()
            .find(|card| card.manager_id == cmd.manager_id)
        else {
            return InsightResult::fallback(SUMMARY_FALLBACK);
        };

        let context = match cmd.snapshot.to_context() {
            Ok(context) => context,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialise insight snapshot");
                return InsightResult::fallback(SUMMARY_FALLBACK);
            }
        };

        let request = CompletionRequest::new(format!("summary-{}", cmd.manager_id))
            .with_system_prompt(SUMMARY_SYSTEM_PROMPT)
            .with_max_tokens(SUMMARY_MAX_TOKENS)
            .with_temperature(0.3)
            .with_message(
                MessageRole::User,
                format!(
                    "Summarise {} ({}, {}) for the {} period ending {}.\n\nData:\n{}",
                    scorecard.name,
                    scorecard.role.label(),
                    scorecard.department,
                    cmd.snapshot.window.period.label(),
                    cmd.snapshot.window.as_of,
                    context
                ),
            );

        complete_or_fallback(&self.provider, request, self.timeout, SUMMARY_FALLBACK).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, MockAIProvider};
    use crate::application::store::{Command, StateStore};
    use crate::domain::alerts::AlertThresholds;
    use crate::domain::catalog::{Role, RoleCatalog};
    use crate::domain::foundation::Timestamp;
    use crate::ports::AIError;

    fn store_with_manager() -> (StateStore, ManagerId) {
        let mut store = StateStore::new(
            RoleCatalog::standard(),
            AlertThresholds::default(),
            Arc::new(FixedClock::new(Timestamp::now())),
        );
        let id = store
            .dispatch(Command::AddManager {
                name: "Ada".to_string(),
                department: "Sales".to_string(),
                role: Role::SalesManager,
            })
            .unwrap()
            .added_manager()
            .unwrap();
        (store, id)
    }

    fn command(store: &StateStore, id: ManagerId) -> GenerateSummaryCommand {
        GenerateSummaryCommand {
            manager_id: id,
            snapshot: InsightSnapshot::of_manager(store.state(), &id).unwrap(),
        }
    }

    #[tokio::test]
    async fn returns_provider_text() {
        let (store, id) = store_with_manager();
        let provider = Arc::new(MockAIProvider::new().with_response("Ada is on track."));
        let handler = GenerateSummaryHandler::new(provider.clone(), Duration::from_secs(5));

        let result = handler.handle(command(&store, id)).await;

        assert_eq!(result.text, "Ada is on track.");
        assert!(!result.degraded);
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].messages[0].content.contains("Summarise Ada"));
        assert!(!calls[0].web_search);
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_fallback() {
        let (store, id) = store_with_manager();
        let provider = Arc::new(MockAIProvider::new().with_error(AIError::AuthenticationFailed));
        let handler = GenerateSummaryHandler::new(provider, Duration::from_secs(5));

        let result = handler.handle(command(&store, id)).await;

        assert_eq!(result.text, SUMMARY_FALLBACK);
        assert!(result.degraded);
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let (store, id) = store_with_manager();
        let provider = Arc::new(
            MockAIProvider::new()
                .with_response("too late")
                .with_delay(Duration::from_millis(500)),
        );
        let handler = GenerateSummaryHandler::new(provider, Duration::from_millis(20));

        let result = handler.handle(command(&store, id)).await;
        assert!(result.degraded);
    }

    #[tokio::test]
    async fn unknown_manager_in_snapshot_degrades_without_calling() {
        let (store, id) = store_with_manager();
        let provider = Arc::new(MockAIProvider::new());
        let handler = GenerateSummaryHandler::new(provider.clone(), Duration::from_secs(5));

        let mut cmd = command(&store, id);
        cmd.manager_id = ManagerId::new();
        let result = handler.handle(cmd).await;

        assert!(result.degraded);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn store_is_untouched_by_failed_summary() {
        let (store, id) = store_with_manager();
        let before = store.state().clone();
        let provider = Arc::new(MockAIProvider::new().with_error(AIError::unavailable("down")));
        let handler = GenerateSummaryHandler::new(provider, Duration::from_secs(5));

        handler.handle(command(&store, id)).await;
        assert_eq!(store.state(), &before);
    }
}
