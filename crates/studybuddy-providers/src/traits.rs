//! Chat provider trait — the abstraction the dispatcher iterates over.
//!
//! Every backend (OpenAI, Gemini, Groq) is reached through [`ChatProvider`].
//! The `HttpProvider` in `http_provider.rs` covers all OpenAI-compatible
//! APIs; tests supply scripted implementations.

use async_trait::async_trait;
use studybuddy_core::types::Message;

use crate::error::ProviderError;

/// Generation parameters passed to each chat call.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 600,
            temperature: 0.7,
        }
    }
}

/// Trait that all chat providers must implement.
///
/// Unlike a client that renders errors into reply text, `complete`
/// returns `Err(ProviderError)` on any failure so the dispatcher can
/// classify it and decide whether to fall through.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat completion request and return the assistant text.
    async fn complete(
        &self,
        messages: &[Message],
        config: &RequestConfig,
    ) -> Result<String, ProviderError>;

    /// Stable identifier used to tag dispatch results (e.g. `"openai"`).
    fn name(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
