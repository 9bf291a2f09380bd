//! High-level study assistant facade.
//!
//! Wraps the provider fallback dispatcher with the study-specific
//! prompts (explanations, quizzes, flashcards) and the user's profile,
//! so callers never touch raw prompt strings.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use studybuddy_core::Config;
use studybuddy_providers::{
    ChatProvider, DispatchRequest, DispatchResult, FallbackDispatcher,
};

use crate::flashcards::{self, Flashcard, FlashcardParseError};
use crate::profile::UserProfile;
use crate::prompts;
use crate::quiz::{self, Quiz, QuizParseError};

/// Errors from operations that post-process the model reply.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Every provider failed; carries the user-facing message.
    #[error("{0}")]
    Unavailable(String),

    #[error("could not parse quiz: {0}")]
    QuizParse(#[from] QuizParseError),

    #[error("could not parse flashcards: {0}")]
    FlashcardParse(#[from] FlashcardParseError),
}

/// The study assistant: dispatcher + persona + user profile.
pub struct StudyAssistant {
    dispatcher: FallbackDispatcher,
    profile: UserProfile,
    max_output_tokens: u32,
}

impl StudyAssistant {
    /// Build the assistant from configuration and a loaded profile.
    pub fn new(config: &Config, profile: UserProfile) -> Self {
        Self {
            dispatcher: FallbackDispatcher::from_config(config),
            profile,
            max_output_tokens: config.assistant.max_output_tokens,
        }
    }

    /// Build from an explicit provider chain (mostly for tests).
    pub fn with_chain(
        chain: Vec<Arc<dyn ChatProvider>>,
        profile: UserProfile,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            dispatcher: FallbackDispatcher::new(chain, 0.7, Duration::from_secs(20)),
            profile,
            max_output_tokens,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
    }

    /// Provider identifiers in attempt order, for status displays.
    pub fn provider_names(&self) -> Vec<&str> {
        self.dispatcher.provider_names()
    }

    /// System context sent with every request: persona plus whatever
    /// the profile knows about the user.
    fn context(&self) -> String {
        match self.profile.context_summary() {
            Some(summary) => format!("{}\n{summary}", prompts::PERSONA),
            None => prompts::PERSONA.to_string(),
        }
    }

    async fn send(&self, prompt: String) -> DispatchResult {
        let request =
            DispatchRequest::new(prompt, self.max_output_tokens).with_context(self.context());
        self.dispatcher.dispatch(request).await
    }

    /// Explain a topic in simple terms.
    pub async fn explain(&self, topic: &str) -> DispatchResult {
        self.send(prompts::explain(topic)).await
    }

    /// Answer a free-form question.
    pub async fn ask(&self, question: &str) -> DispatchResult {
        self.send(question.to_string()).await
    }

    /// Summarize a block of notes or pasted text.
    pub async fn summarize(&self, text: &str) -> DispatchResult {
        self.send(prompts::summarize(text)).await
    }

    /// Generate a quiz of `n` questions about `topic`.
    pub async fn quiz(&self, topic: &str, n: usize) -> Result<Quiz, AssistantError> {
        let result = self.send(quiz::quiz_prompt(topic, n)).await;
        let raw = Self::require_text(result)?;
        debug!(chars = raw.len(), "parsing quiz reply");
        Ok(quiz::parse_quiz(&raw)?)
    }

    /// Generate `n` flashcards about `topic`.
    pub async fn flashcards(&self, topic: &str, n: usize) -> Result<Vec<Flashcard>, AssistantError> {
        let result = self.send(flashcards::flashcard_prompt(topic, n)).await;
        let raw = Self::require_text(result)?;
        Ok(flashcards::parse_flashcards(&raw)?)
    }

    fn require_text(result: DispatchResult) -> Result<String, AssistantError> {
        match result.text() {
            Some(text) => Ok(text.to_string()),
            None => Err(AssistantError::Unavailable(
                result
                    .failure_message()
                    .unwrap_or(studybuddy_providers::dispatcher::ALL_FAILED_MESSAGE)
                    .to_string(),
            )),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
