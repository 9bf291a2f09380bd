//! Generic HTTP chat provider for OpenAI-compatible APIs.
//!
//! One client covers every supported backend: OpenAI natively, Gemini and
//! Groq via their OpenAI-compatible `/chat/completions` endpoints.
//!
//! This is also where provider-specific error wording is interpreted:
//! HTTP status and error body are mapped into [`ProviderError`] using the
//! spec's quota markers, so everything above this layer works with one
//! shared error vocabulary.

use async_trait::async_trait;
use tracing::{debug, error};

use studybuddy_core::config::ProviderConfig;
use studybuddy_core::types::{ChatCompletionRequest, ChatCompletionResponse, Message};

use crate::error::ProviderError;
use crate::registry::ProviderSpec;
use crate::traits::{ChatProvider, RequestConfig};

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// A chat provider that talks to any OpenAI-compatible HTTP API.
pub struct HttpProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Model identifier sent with each request.
    model: String,
    /// Static spec for this backend (name, quota markers).
    spec: &'static ProviderSpec,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("provider", &self.spec.display_name)
            .finish()
    }
}

impl HttpProvider {
    /// Create a new HttpProvider from a provider config and spec.
    ///
    /// Config values override the spec defaults for API base and model.
    pub fn new(config: &ProviderConfig, spec: &'static ProviderSpec) -> Self {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| spec.default_api_base.to_string());
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| spec.default_model.to_string());

        // No client-level timeout; the dispatcher enforces its own
        // per-attempt deadline.
        let client = reqwest::Client::new();

        HttpProvider {
            client,
            api_base,
            api_key: config.api_key.clone(),
            model,
            spec,
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    /// Map a non-success HTTP response into a `ProviderError`.
    ///
    /// 429 is always quota/rate-limit. Some backends report quota
    /// exhaustion with other statuses (OpenAI uses 403 for
    /// `insufficient_quota`), so the body is also checked against the
    /// spec's quota markers before the status-based mapping.
    fn map_api_error(&self, status: u16, body: String) -> ProviderError {
        if status == 429 || self.spec.quota_markers.iter().any(|m| body.contains(m)) {
            return ProviderError::QuotaExhausted(format!("{}: {}", status, body));
        }
        match status {
            401 | 403 => ProviderError::Auth(body),
            _ => ProviderError::Api { status, body },
        }
    }
}

#[async_trait]
impl ChatProvider for HttpProvider {
    async fn complete(
        &self,
        messages: &[Message],
        config: &RequestConfig,
    ) -> Result<String, ProviderError> {
        debug!(
            provider = self.spec.display_name,
            model = %self.model,
            messages = messages.len(),
            "calling chat completion API"
        );

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
        };

        let result = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                error!(provider = self.spec.display_name, "HTTP request timed out");
                return Err(ProviderError::Timeout);
            }
            Err(e) => {
                error!(provider = self.spec.display_name, error = %e, "HTTP request failed");
                return Err(ProviderError::Network(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = self.spec.display_name,
                status = %status,
                body = %body,
                "API error"
            );
            return Err(self.map_api_error(status.as_u16(), body));
        }

        let chat_resp: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        match chat_resp.text() {
            Some(text) if !text.is_empty() => {
                debug!(
                    provider = self.spec.display_name,
                    chars = text.len(),
                    "chat completion received"
                );
                Ok(text.to_string())
            }
            _ => Err(ProviderError::EmptyResponse),
        }
    }

    fn name(&self) -> &str {
        self.spec.name
    }

    fn display_name(&self) -> &str {
        self.spec.display_name
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_name;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_config(api_key: &str, api_base: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.to_string(),
            api_base: api_base.map(String::from),
            model: None,
        }
    }

    // ── Unit tests ──

    #[test]
    fn test_completions_url_trailing_slash() {
        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some("https://api.openai.com/v1/"));
        let provider = HttpProvider::new(&config, spec);
        assert_eq!(
            provider.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_default_api_base_and_model() {
        let spec = find_by_name("groq").unwrap();
        let config = make_config("gsk-abc", None);
        let provider = HttpProvider::new(&config, spec);
        assert_eq!(provider.api_base, "https://api.groq.com/openai/v1");
        assert_eq!(provider.model, "llama-3.1-8b-instant");
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.display_name(), "Groq");
    }

    #[test]
    fn test_config_overrides_defaults() {
        let spec = find_by_name("openai").unwrap();
        let config = ProviderConfig {
            api_key: "sk-abc".to_string(),
            api_base: Some("https://custom.proxy.com/v1".to_string()),
            model: Some("gpt-4o".to_string()),
        };
        let provider = HttpProvider::new(&config, spec);
        assert_eq!(provider.api_base, "https://custom.proxy.com/v1");
        assert_eq!(provider.model, "gpt-4o");
    }

    #[test]
    fn test_map_429_to_quota() {
        let spec = find_by_name("openai").unwrap();
        let provider = HttpProvider::new(&make_config("k", None), spec);
        let err = provider.map_api_error(429, "Too many requests".into());
        assert!(matches!(err, ProviderError::QuotaExhausted(_)));
    }

    #[test]
    fn test_map_quota_marker_on_other_status() {
        // OpenAI reports hard quota exhaustion as 403 insufficient_quota
        let spec = find_by_name("openai").unwrap();
        let provider = HttpProvider::new(&make_config("k", None), spec);
        let err = provider.map_api_error(
            403,
            r#"{"error":{"code":"insufficient_quota"}}"#.into(),
        );
        assert!(matches!(err, ProviderError::QuotaExhausted(_)));
    }

    #[test]
    fn test_map_gemini_resource_exhausted() {
        let spec = find_by_name("gemini").unwrap();
        let provider = HttpProvider::new(&make_config("k", None), spec);
        let err = provider.map_api_error(
            400,
            r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#.into(),
        );
        assert!(matches!(err, ProviderError::QuotaExhausted(_)));
    }

    #[test]
    fn test_map_401_to_auth() {
        let spec = find_by_name("groq").unwrap();
        let provider = HttpProvider::new(&make_config("k", None), spec);
        let err = provider.map_api_error(401, "Invalid API key".into());
        assert!(matches!(err, ProviderError::Auth(_)));
    }

    #[test]
    fn test_map_500_to_api() {
        let spec = find_by_name("openai").unwrap();
        let provider = HttpProvider::new(&make_config("k", None), spec);
        let err = provider.map_api_error(500, "internal error".into());
        assert!(matches!(err, ProviderError::Api { status: 500, .. }));
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-test",
                "choices": [{
                    "message": { "content": "Photosynthesis converts light to energy." },
                    "finish_reason": "stop"
                }],
                "usage": {
                    "prompt_tokens": 10,
                    "completion_tokens": 7,
                    "total_tokens": 17
                }
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("openai").unwrap();
        let config = make_config("test-key-123", Some(&mock_server.uri()));
        let provider = HttpProvider::new(&config, spec);

        let messages = vec![
            Message::system("You are a friendly AI Study Buddy."),
            Message::user("Explain photosynthesis simply."),
        ];

        let text = provider
            .complete(&messages, &RequestConfig::default())
            .await
            .unwrap();
        assert_eq!(text, "Photosynthesis converts light to energy.");
    }

    #[tokio::test]
    async fn test_complete_sends_correct_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.1-8b-instant",
                "max_tokens": 600
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-body",
                "choices": [{
                    "message": { "content": "ok" },
                    "finish_reason": "stop"
                }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("groq").unwrap();
        let config = make_config("gsk-key", Some(&mock_server.uri()));
        let provider = HttpProvider::new(&config, spec);

        let messages = vec![Message::user("test")];
        // If the body matcher fails, wiremock returns 404 → the call errors
        let text = provider
            .complete(&messages, &RequestConfig::default())
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_complete_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(serde_json::json!({
                    "error": {
                        "message": "Rate limit exceeded",
                        "type": "rate_limit_error"
                    }
                })),
            )
            .mount(&mock_server)
            .await;

        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some(&mock_server.uri()));
        let provider = HttpProvider::new(&config, spec);

        let err = provider
            .complete(&[Message::user("Hello")], &RequestConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::QuotaExhausted(_)));
    }

    #[tokio::test]
    async fn test_complete_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("groq").unwrap();
        let config = make_config("bad-key", Some(&mock_server.uri()));
        let provider = HttpProvider::new(&config, spec);

        let err = provider
            .complete(&[Message::user("Hello")], &RequestConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Auth(_)));
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        // Point to a port that's not listening
        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some("http://127.0.0.1:1"));
        let provider = HttpProvider::new(&config, spec);

        let err = provider
            .complete(&[Message::user("Hello")], &RequestConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[tokio::test]
    async fn test_complete_empty_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-empty",
                "choices": [{
                    "message": { "content": "   " },
                    "finish_reason": "stop"
                }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("gemini").unwrap();
        let config = make_config("key", Some(&mock_server.uri()));
        let provider = HttpProvider::new(&config, spec);

        let err = provider
            .complete(&[Message::user("Hello")], &RequestConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_complete_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let spec = find_by_name("openai").unwrap();
        let config = make_config("key", Some(&mock_server.uri()));
        let provider = HttpProvider::new(&config, spec);

        let err = provider
            .complete(&[Message::user("Hello")], &RequestConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
