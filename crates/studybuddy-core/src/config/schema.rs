//! Configuration schema.
//!
//! Hierarchy: `Config` → `AssistantConfig`, `ProvidersConfig`,
//! `TranscriptionConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.studybuddy/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub assistant: AssistantConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
}

// ─────────────────────────────────────────────
// Assistant
// ─────────────────────────────────────────────

/// Assistant-level generation settings, including the provider fallback
/// chain order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssistantConfig {
    /// Maximum tokens to generate per response.
    pub max_output_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Per-provider attempt timeout in seconds. A timed-out attempt falls
    /// through to the next provider in the chain.
    pub attempt_timeout_seconds: u64,
    /// Provider names to try, in order. Unknown names are skipped with a
    /// warning; providers without credentials are skipped at chain build.
    pub fallback_order: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 600,
            temperature: 0.7,
            attempt_timeout_seconds: 20,
            fallback_order: vec![
                "openai".to_string(),
                "gemini".to_string(),
                "groq".to_string(),
            ],
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Configuration for a single chat-completion provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication.
    #[serde(default)]
    pub api_key: String,
    /// Custom API base URL (overrides the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model identifier (overrides the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// All provider configurations, one per supported backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
    #[serde(default)]
    pub gemini: ProviderConfig,
    #[serde(default)]
    pub groq: ProviderConfig,
}

impl ProvidersConfig {
    /// Get a provider config by name (e.g. `"openai"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "openai" => Some(&self.openai),
            "gemini" => Some(&self.gemini),
            "groq" => Some(&self.groq),
            _ => None,
        }
    }

    /// Convert to a `HashMap<String, ProviderConfig>` for use with the
    /// provider registry.
    pub fn to_map(&self) -> HashMap<String, ProviderConfig> {
        let mut map = HashMap::new();
        let entries: &[(&str, &ProviderConfig)] = &[
            ("openai", &self.openai),
            ("gemini", &self.gemini),
            ("groq", &self.groq),
        ];
        for (name, config) in entries {
            map.insert(name.to_string(), (*config).clone());
        }
        map
    }
}

// ─────────────────────────────────────────────
// Transcription
// ─────────────────────────────────────────────

/// Voice transcription configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriptionConfig {
    /// Whether voice transcription is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// API key for the transcription provider.
    /// Falls back to GROQ_API_KEY env var if empty.
    #[serde(default)]
    pub api_key: String,
    /// Whisper model name.
    #[serde(default = "default_whisper_model")]
    pub model: String,
}

fn default_true() -> bool {
    true
}

fn default_whisper_model() -> String {
    "whisper-large-v3".into()
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            model: "whisper-large-v3".into(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assistant.max_output_tokens, 600);
        assert_eq!(config.assistant.temperature, 0.7);
        assert_eq!(config.assistant.attempt_timeout_seconds, 20);
        assert_eq!(
            config.assistant.fallback_order,
            vec!["openai", "gemini", "groq"]
        );
    }

    #[test]
    fn test_config_from_json_camel_case() {
        let json = serde_json::json!({
            "assistant": {
                "maxOutputTokens": 1500,
                "temperature": 0.5,
                "attemptTimeoutSeconds": 30,
                "fallbackOrder": ["groq", "openai"]
            }
        });

        let config: Config = serde_json::from_value(json).unwrap();
        assert_eq!(config.assistant.max_output_tokens, 1500);
        assert_eq!(config.assistant.temperature, 0.5);
        assert_eq!(config.assistant.attempt_timeout_seconds, 30);
        assert_eq!(config.assistant.fallback_order, vec!["groq", "openai"]);
        // Defaults preserved for missing sections
        assert!(!config.providers.openai.is_configured());
    }

    #[test]
    fn test_config_json_uses_camel_case() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["assistant"].get("maxOutputTokens").is_some());
        assert!(json["assistant"].get("fallbackOrder").is_some());
        assert!(json["assistant"].get("max_output_tokens").is_none());
    }

    #[test]
    fn test_provider_config_is_configured() {
        let empty = ProviderConfig::default();
        assert!(!empty.is_configured());

        let with_key = ProviderConfig {
            api_key: "sk-123".to_string(),
            ..Default::default()
        };
        assert!(with_key.is_configured());
    }

    #[test]
    fn test_providers_get_by_name() {
        let mut providers = ProvidersConfig::default();
        providers.gemini.api_key = "AIza-test".to_string();

        assert!(providers.get_by_name("gemini").unwrap().is_configured());
        assert!(!providers.get_by_name("openai").unwrap().is_configured());
        assert!(providers.get_by_name("nonexistent").is_none());
    }

    #[test]
    fn test_providers_to_map() {
        let mut providers = ProvidersConfig::default();
        providers.openai.api_key = "sk-openai".to_string();

        let map = providers.to_map();
        assert_eq!(map.len(), 3);
        assert!(map.get("openai").unwrap().is_configured());
        assert!(!map.get("groq").unwrap().is_configured());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = serde_json::json!({
            "providers": {
                "openai": {
                    "apiKey": "sk-test",
                    "model": "gpt-4o-mini"
                }
            }
        });

        let config: Config = serde_json::from_value(json).unwrap();
        assert_eq!(config.providers.openai.api_key, "sk-test");
        assert_eq!(
            config.providers.openai.model.as_deref(),
            Some("gpt-4o-mini")
        );
        assert!(!config.providers.gemini.is_configured());
        // Assistant defaults still present
        assert_eq!(config.assistant.max_output_tokens, 600);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.assistant.max_output_tokens, 600);
        assert!(config.transcription.enabled);
        assert_eq!(config.transcription.model, "whisper-large-v3");
    }
}
