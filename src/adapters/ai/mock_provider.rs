//! Mock AI Provider for testing and offline runs.
//!
//! Returns queued responses in order, optionally after a simulated delay,
//! and records every request so tests can inspect the prompts that the
//! insight handlers build.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Ada is on track.")
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, Citation, CompletionRequest, CompletionResponse, ProviderInfo,
    TokenUsage,
};

const DEFAULT_CONTENT: &str = "Mock response";

/// Mock AI provider.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Queued outcomes (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<CompletionResponse, AIError>>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1").with_web_search(true),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a plain text response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        let response = CompletionResponse::text(content, self.info.model.clone())
            .with_usage(TokenUsage::new(10, 20));
        self.push(Ok(response))
    }

    /// Queues a text response carrying web sources.
    pub fn with_cited_response(self, content: impl Into<String>, sources: Vec<Citation>) -> Self {
        let response =
            CompletionResponse::text(content, self.info.model.clone()).with_sources(sources);
        self.push(Ok(response))
    }

    /// Queues an error.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(Err(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded requests.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn push(self, outcome: Result<CompletionResponse, AIError>) -> Self {
        lock(&self.responses).push_back(outcome);
        self
    }

    fn next_outcome(&self) -> Result<CompletionResponse, AIError> {
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Ok(CompletionResponse::text(
                DEFAULT_CONTENT,
                self.info.model.clone(),
            ))
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let web_search = request.web_search;
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let mut outcome = self.next_outcome();
        if let Ok(response) = &mut outcome {
            if !web_search {
                response.sources.clear();
            }
        }
        outcome
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FinishReason, MessageRole};

    fn request() -> CompletionRequest {
        CompletionRequest::new("trace-123").with_message(MessageRole::User, "Hello")
    }

    fn source() -> Citation {
        Citation {
            uri: "https://example.com/retention".to_string(),
            title: "Retention benchmarks".to_string(),
        }
    }

    #[tokio::test]
    async fn returns_responses_in_order_then_default() {
        let provider = MockAIProvider::new().with_response("First").with_response("Second");

        assert_eq!(provider.complete(request()).await.unwrap().content, "First");
        assert_eq!(provider.complete(request()).await.unwrap().content, "Second");
        let fallback = provider.complete(request()).await.unwrap();
        assert_eq!(fallback.content, DEFAULT_CONTENT);
        assert_eq!(fallback.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockAIProvider::new().with_error(AIError::rate_limited(30));

        let err = provider.complete(request()).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err, AIError::rate_limited(30));
    }

    #[tokio::test]
    async fn records_calls() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.call_count(), 0);

        provider.complete(request()).await.unwrap();
        provider.complete(request().with_web_search(true)).await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].web_search);
        assert!(calls[1].web_search);
    }

    #[tokio::test]
    async fn sources_only_returned_when_web_search_requested() {
        let provider = MockAIProvider::new()
            .with_cited_response("Grounded", vec![source()])
            .with_cited_response("Grounded", vec![source()]);

        let plain = provider.complete(request()).await.unwrap();
        assert!(plain.sources.is_empty());

        let cited = provider.complete(request().with_web_search(true)).await.unwrap();
        assert_eq!(cited.sources, vec![source()]);
    }

    #[tokio::test]
    async fn respects_delay() {
        let provider = MockAIProvider::new()
            .with_response("Delayed")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.complete(request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn reports_provider_info() {
        let provider = MockAIProvider::new()
            .with_provider_info(ProviderInfo::new("custom", "custom-model"));
        let info = provider.provider_info();
        assert_eq!(info.name, "custom");
        assert!(!info.supports_web_search);
    }
}
