//! Shared call path for insight requests: timeout, error capture and
//! static fallback.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::ports::{AIError, AIProvider, Citation, CompletionRequest};

/// Text produced for the user by an insight request.
///
/// `degraded` is set when the provider failed or timed out and `text` is
/// the static fallback message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Citation>,
    pub degraded: bool,
}

impl InsightResult {
    pub fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sources: Vec::new(),
            degraded: true,
        }
    }
}

/// Runs one completion bounded by `limit`. Never fails: any error becomes
/// `fallback`.
pub(super) async fn complete_or_fallback(
    provider: &Arc<dyn AIProvider>,
    request: CompletionRequest,
    limit: Duration,
    fallback: &str,
) -> InsightResult {
    let trace_id = request.trace_id.clone();
    let outcome = match timeout(limit, provider.complete(request)).await {
        Ok(result) => result,
        Err(_) => Err(AIError::Timeout {
            timeout_secs: limit.as_secs(),
        }),
    };

    match outcome {
        Ok(response) if !response.content.trim().is_empty() => {
            debug!(trace_id = %trace_id, sources = response.sources.len(), "insight generated");
            InsightResult {
                text: response.content,
                sources: response.sources,
                degraded: false,
            }
        }
        Ok(_) => {
            warn!(trace_id = %trace_id, "insight provider returned empty text");
            InsightResult::fallback(fallback)
        }
        Err(err) => {
            warn!(trace_id = %trace_id, error = %err, "insight provider failed");
            InsightResult::fallback(fallback)
        }
    }
}
