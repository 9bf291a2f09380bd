//! Provider registry — static specs for the supported chat backends.
//!
//! Each `ProviderSpec` describes how to reach one backend: env var for
//! the key, default endpoint and model, and the strings that backend
//! uses to signal quota exhaustion in error bodies.
//!
//! The fallback chain itself is configuration (`assistant.fallbackOrder`);
//! this module only knows how to look specs up and build the ordered
//! provider list from a config.

use std::sync::Arc;

use tracing::{debug, warn};

use studybuddy_core::config::Config;

use crate::http_provider::HttpProvider;
use crate::traits::ChatProvider;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one backend
// ─────────────────────────────────────────────

/// Static specification describing one chat provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name (e.g. `"openai"`), also the dispatch result tag.
    pub name: &'static str,
    /// Environment variable for the API key. E.g. `"OPENAI_API_KEY"`.
    pub env_key: &'static str,
    /// Human-readable name for logs. E.g. `"OpenAI"`.
    pub display_name: &'static str,
    /// Default API base URL (OpenAI-compatible chat completions root).
    pub default_api_base: &'static str,
    /// Default model when the config doesn't name one.
    pub default_model: &'static str,
    /// Substrings in error bodies that mean "quota/rate limit exhausted"
    /// for this backend. Matched case-sensitively against the raw body.
    pub quota_markers: &'static [&'static str],
}

/// Supported provider specifications.
///
/// Order here is only a catalog; attempt order comes from
/// `assistant.fallbackOrder` in the config.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "openai",
        env_key: "OPENAI_API_KEY",
        display_name: "OpenAI",
        default_api_base: "https://api.openai.com/v1",
        default_model: "gpt-4o-mini",
        quota_markers: &["insufficient_quota", "rate_limit"],
    },
    ProviderSpec {
        name: "gemini",
        env_key: "GEMINI_API_KEY",
        display_name: "Gemini",
        // Gemini's OpenAI-compatible endpoint
        default_api_base: "https://generativelanguage.googleapis.com/v1beta/openai",
        default_model: "gemini-2.5-flash",
        quota_markers: &["RESOURCE_EXHAUSTED", "quota"],
    },
    ProviderSpec {
        name: "groq",
        env_key: "GROQ_API_KEY",
        display_name: "Groq",
        default_api_base: "https://api.groq.com/openai/v1",
        default_model: "llama-3.1-8b-instant",
        quota_markers: &["rate_limit_exceeded"],
    },
];

/// Find a provider spec by exact name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

// ─────────────────────────────────────────────
// Chain building
// ─────────────────────────────────────────────

/// Build the ordered provider chain from configuration.
///
/// Walks `assistant.fallbackOrder`, skipping unknown names (with a
/// warning) and providers without an API key. The result may be empty —
/// the dispatcher turns an empty chain into an immediate terminal
/// failure without any network calls.
pub fn build_chain(config: &Config) -> Vec<Arc<dyn ChatProvider>> {
    let providers_map = config.providers.to_map();
    let mut chain: Vec<Arc<dyn ChatProvider>> = Vec::new();

    for name in &config.assistant.fallback_order {
        let Some(spec) = find_by_name(name) else {
            warn!(provider = %name, "unknown provider in fallbackOrder, skipping");
            continue;
        };
        let Some(provider_config) = providers_map.get(spec.name) else {
            continue;
        };
        if !provider_config.is_configured() {
            debug!(
                provider = spec.name,
                "no API key configured, skipping in fallback chain"
            );
            continue;
        }
        chain.push(Arc::new(HttpProvider::new(provider_config, spec)));
    }

    chain
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name_openai() {
        let spec = find_by_name("openai").unwrap();
        assert_eq!(spec.display_name, "OpenAI");
        assert_eq!(spec.env_key, "OPENAI_API_KEY");
        assert_eq!(spec.default_model, "gpt-4o-mini");
    }

    #[test]
    fn test_find_by_name_gemini() {
        let spec = find_by_name("gemini").unwrap();
        assert!(spec.default_api_base.contains("generativelanguage"));
        assert!(spec.quota_markers.contains(&"RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_find_by_name_unknown() {
        assert!(find_by_name("mistral").is_none());
    }

    #[test]
    fn test_all_providers_have_unique_names() {
        let names: Vec<&str> = PROVIDERS.iter().map(|s| s.name).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "Duplicate provider names found");
    }

    #[test]
    fn test_all_providers_have_quota_markers() {
        for spec in PROVIDERS {
            assert!(
                !spec.quota_markers.is_empty(),
                "{} has no quota markers",
                spec.name
            );
        }
    }

    #[test]
    fn test_build_chain_order_follows_config() {
        let mut config = Config::default();
        config.providers.openai.api_key = "sk-1".into();
        config.providers.gemini.api_key = "AIza-2".into();
        config.providers.groq.api_key = "gsk-3".into();
        config.assistant.fallback_order =
            vec!["groq".into(), "openai".into(), "gemini".into()];

        let chain = build_chain(&config);
        let names: Vec<&str> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["groq", "openai", "gemini"]);
    }

    #[test]
    fn test_build_chain_skips_unconfigured() {
        let mut config = Config::default();
        config.providers.gemini.api_key = "AIza-only".into();

        let chain = build_chain(&config);
        let names: Vec<&str> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["gemini"]);
    }

    #[test]
    fn test_build_chain_skips_unknown_names() {
        let mut config = Config::default();
        config.providers.openai.api_key = "sk-1".into();
        config.assistant.fallback_order = vec!["mistral".into(), "openai".into()];

        let chain = build_chain(&config);
        let names: Vec<&str> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["openai"]);
    }

    #[test]
    fn test_build_chain_empty_when_no_keys() {
        // build_chain only reads the config object; env keys are merged
        // earlier, by the loader.
        let chain = build_chain(&Config::default());
        assert!(chain.is_empty());
    }
}
