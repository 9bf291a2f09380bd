//! Fallback dispatcher — ordered primary → backup chat dispatch.
//!
//! Given a prompt and a token budget, tries each configured provider in
//! order and returns the first non-empty response, or a terminal failure
//! once the chain is exhausted. One attempt per provider per call, no
//! state kept between calls.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use studybuddy_core::config::Config;
use studybuddy_core::types::Message;
use studybuddy_core::utils::truncate_string;

use crate::error::OutcomeClass;
use crate::registry::build_chain;
use crate::traits::{ChatProvider, RequestConfig};

/// Terminal failure message when every provider has failed.
pub const ALL_FAILED_MESSAGE: &str = "AI service unavailable. Please try again later.";

// ─────────────────────────────────────────────
// Request / result types
// ─────────────────────────────────────────────

/// One logical generation request.
#[derive(Clone, Debug)]
pub struct DispatchRequest {
    /// The user prompt. Must be non-empty.
    pub prompt: String,
    /// Maximum output tokens. Must be positive.
    pub max_tokens: u32,
    /// Optional context prepended as a system message (e.g. the user's
    /// profile summary).
    pub context: Option<String>,
}

impl DispatchRequest {
    /// A plain prompt with the given token budget and no extra context.
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            context: None,
        }
    }

    /// Attach a system-context preamble.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Build the message list sent to each provider.
    fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if let Some(ref context) = self.context {
            messages.push(Message::system(context.clone()));
        }
        messages.push(Message::user(self.prompt.clone()));
        messages
    }
}

/// One provider attempt: who was tried and how it ended.
///
/// Surfaced to callers so the UI can show "switching to backup model"
/// style notices without parsing logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptEvent {
    /// Provider identifier (e.g. `"openai"`).
    pub provider: String,
    /// How the attempt ended.
    pub outcome: OutcomeClass,
}

/// Final outcome of a dispatch call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Exactly one provider's output; never partial or merged.
    Success {
        /// Identifier of the provider that produced the text.
        provider: String,
        /// The response text (non-empty).
        text: String,
    },
    /// Every configured provider failed, or the request was unusable.
    AllFailed {
        /// Human-readable terminal message.
        message: String,
    },
}

/// Result of a dispatch call: the outcome plus the full attempt trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchResult {
    pub outcome: DispatchOutcome,
    /// Every provider attempted this call, in order.
    pub attempts: Vec<AttemptEvent>,
}

impl DispatchResult {
    fn failed(message: impl Into<String>, attempts: Vec<AttemptEvent>) -> Self {
        Self {
            outcome: DispatchOutcome::AllFailed {
                message: message.into(),
            },
            attempts,
        }
    }

    /// The response text, if any provider succeeded.
    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            DispatchOutcome::Success { text, .. } => Some(text),
            DispatchOutcome::AllFailed { .. } => None,
        }
    }

    /// Identifier of the provider that produced the response, if any.
    pub fn provider(&self) -> Option<&str> {
        match &self.outcome {
            DispatchOutcome::Success { provider, .. } => Some(provider),
            DispatchOutcome::AllFailed { .. } => None,
        }
    }

    /// The terminal message when no provider succeeded.
    pub fn failure_message(&self) -> Option<&str> {
        match &self.outcome {
            DispatchOutcome::Success { .. } => None,
            DispatchOutcome::AllFailed { message } => Some(message),
        }
    }
}

// ─────────────────────────────────────────────
// FallbackDispatcher
// ─────────────────────────────────────────────

/// Tries providers in a fixed order, returning the first usable result.
///
/// The provider list is built once from configuration and immutable for
/// the dispatcher's lifetime. Each [`dispatch`](Self::dispatch) call is
/// independent; concurrent calls are safe since providers are stateless.
pub struct FallbackDispatcher {
    chain: Vec<Arc<dyn ChatProvider>>,
    temperature: f64,
    attempt_timeout: Duration,
}

impl FallbackDispatcher {
    /// Build a dispatcher from configuration (provider chain order,
    /// temperature, per-attempt timeout).
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            build_chain(config),
            config.assistant.temperature,
            Duration::from_secs(config.assistant.attempt_timeout_seconds),
        )
    }

    /// Build a dispatcher from an explicit provider chain.
    pub fn new(
        chain: Vec<Arc<dyn ChatProvider>>,
        temperature: f64,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            chain,
            temperature,
            attempt_timeout,
        }
    }

    /// Number of providers in the chain.
    pub fn provider_count(&self) -> usize {
        self.chain.len()
    }

    /// Provider identifiers in attempt order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.chain.iter().map(|p| p.name()).collect()
    }

    /// Try each provider in order; return the first non-empty response.
    ///
    /// Never returns an error: every provider failure is classified and
    /// converted into either a fallthrough to the next provider or the
    /// terminal [`ALL_FAILED_MESSAGE`]. No provider is retried within a
    /// single call.
    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResult {
        if request.prompt.trim().is_empty() {
            return DispatchResult::failed("Prompt must not be empty.", Vec::new());
        }
        if request.max_tokens == 0 {
            return DispatchResult::failed("Token budget must be positive.", Vec::new());
        }
        if self.chain.is_empty() {
            warn!("no chat providers configured, failing without any calls");
            return DispatchResult::failed(
                "No AI provider is configured. Set an API key (e.g. OPENAI_API_KEY).",
                Vec::new(),
            );
        }

        let messages = request.messages();
        let config = RequestConfig {
            max_tokens: request.max_tokens,
            temperature: self.temperature,
        };

        let mut attempts = Vec::with_capacity(self.chain.len());

        for provider in &self.chain {
            let outcome = self.attempt(provider.as_ref(), &messages, &config).await;

            match outcome {
                Attempt::Succeeded(text) => {
                    attempts.push(AttemptEvent {
                        provider: provider.name().to_string(),
                        outcome: OutcomeClass::Succeeded,
                    });
                    debug!(
                        provider = provider.name(),
                        chars = text.len(),
                        "dispatch succeeded"
                    );
                    return DispatchResult {
                        outcome: DispatchOutcome::Success {
                            provider: provider.name().to_string(),
                            text,
                        },
                        attempts,
                    };
                }
                Attempt::Failed(class, detail) => {
                    warn!(
                        provider = provider.name(),
                        outcome = %class,
                        detail = %truncate_string(&detail, 200),
                        "provider attempt failed, trying next"
                    );
                    attempts.push(AttemptEvent {
                        provider: provider.name().to_string(),
                        outcome: class,
                    });
                }
            }
        }

        warn!(
            providers = self.chain.len(),
            "all providers failed, returning terminal failure"
        );
        DispatchResult::failed(ALL_FAILED_MESSAGE, attempts)
    }

    /// Run a single provider attempt under the per-attempt timeout.
    async fn attempt(
        &self,
        provider: &dyn ChatProvider,
        messages: &[Message],
        config: &RequestConfig,
    ) -> Attempt {
        let call = provider.complete(messages, config);
        match tokio::time::timeout(self.attempt_timeout, call).await {
            Ok(Ok(text)) => {
                // Response text must be non-empty for the attempt to
                // count as a success.
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Attempt::Failed(OutcomeClass::FailedOther, "empty response text".into())
                } else {
                    Attempt::Succeeded(trimmed.to_string())
                }
            }
            Ok(Err(e)) => Attempt::Failed(e.classify(), e.to_string()),
            Err(_) => Attempt::Failed(
                OutcomeClass::FailedOther,
                format!("attempt timed out after {:?}", self.attempt_timeout),
            ),
        }
    }
}

/// Internal per-attempt result before it is folded into the trail.
enum Attempt {
    Succeeded(String),
    Failed(OutcomeClass, String),
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
