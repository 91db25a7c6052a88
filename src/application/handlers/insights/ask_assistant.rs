//! AskAssistantHandler - free-form questions about the current dashboard.

use std::sync::Arc;
use std::time::Duration;

use super::insight::{complete_or_fallback, InsightResult};
use super::InsightSnapshot;
use crate::domain::foundation::ValidationError;
use crate::ports::{AIProvider, CompletionRequest, Message};

/// Shown when the assistant cannot answer.
pub const ASSISTANT_FALLBACK: &str =
    "Sorry, the assistant could not answer right now. Please try again in a moment.";

const ASSISTANT_SYSTEM_PROMPT: &str = "You are an executive coaching assistant for a manager \
performance dashboard. Answer the user's question using the JSON snapshot of scorecards and \
alerts provided. Scores run 0 to 100; a null score means no data. Be specific and brief. If web \
search is available, use it only for external benchmarks or practices, never for the managers \
themselves.";

const ASSISTANT_MAX_TOKENS: u32 = 1024;

/// A question plus the state it is about.
#[derive(Debug, Clone)]
pub struct AskAssistantCommand {
    pub question: String,
    /// Earlier turns, oldest first.
    pub history: Vec<Message>,
    pub snapshot: InsightSnapshot,
    pub use_web_search: bool,
}

impl AskAssistantCommand {
    pub fn new(question: impl Into<String>, snapshot: InsightSnapshot) -> Self {
        Self {
            question: question.into(),
            history: Vec::new(),
            snapshot,
            use_web_search: false,
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.use_web_search = enabled;
        self
    }
}

/// Handler for conversational questions.
pub struct AskAssistantHandler {
    provider: Arc<dyn AIProvider>,
    timeout: Duration,
    /// Web search allowed by configuration.
    web_search_enabled: bool,
}

impl AskAssistantHandler {
    pub fn new(provider: Arc<dyn AIProvider>, timeout: Duration, web_search_enabled: bool) -> Self {
        Self {
            provider,
            timeout,
            web_search_enabled,
        }
    }

    /// Answers the question. Provider failures come back as the fallback
    /// text with `degraded` set.
    ///
    /// # Errors
    ///
    /// `EmptyField` if the question is blank.
    pub async fn handle(&self, cmd: AskAssistantCommand) -> Result<InsightResult, ValidationError> {
        let question = cmd.question.trim();
        if question.is_empty() {
            return Err(ValidationError::empty_field("question"));
        }

        let context = match cmd.snapshot.to_context() {
            Ok(context) => context,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialise insight snapshot");
                return Ok(InsightResult::fallback(ASSISTANT_FALLBACK));
            }
        };

        let web_search = cmd.use_web_search
            && self.web_search_enabled
            && self.provider.provider_info().supports_web_search;

        let mut request = CompletionRequest::new(format!("ask-{}", uuid::Uuid::new_v4()))
            .with_system_prompt(format!("{}\n\nSnapshot:\n{}", ASSISTANT_SYSTEM_PROMPT, context))
            .with_max_tokens(ASSISTANT_MAX_TOKENS)
            .with_web_search(web_search);
        request.messages = cmd.history;
        request.messages.push(Message::user(question));

        Ok(complete_or_fallback(&self.provider, request, self.timeout, ASSISTANT_FALLBACK).await)
    }
}
