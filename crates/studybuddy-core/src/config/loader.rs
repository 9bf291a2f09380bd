//! Config loader — reads `~/.studybuddy/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.studybuddy/config.json`
//! 3. Environment variables `STUDYBUDDY_<SECTION>__<FIELD>` (override JSON)
//! 4. Conventional provider keys (`OPENAI_API_KEY`, `GEMINI_API_KEY`,
//!    `GROQ_API_KEY`) fill in any credential still missing.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't
/// be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `STUDYBUDDY_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `STUDYBUDDY_ASSISTANT__MAX_OUTPUT_TOKENS` → `assistant.max_output_tokens`
/// - `STUDYBUDDY_ASSISTANT__TEMPERATURE` → `assistant.temperature`
/// - `STUDYBUDDY_ASSISTANT__ATTEMPT_TIMEOUT_SECONDS` → `assistant.attempt_timeout_seconds`
/// - `STUDYBUDDY_ASSISTANT__FALLBACK_ORDER` (comma-separated) → `assistant.fallback_order`
/// - `STUDYBUDDY_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `STUDYBUDDY_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `STUDYBUDDY_PROVIDERS__<NAME>__MODEL` → `providers.<name>.model`
///
/// After the explicit overrides, any provider still missing a key picks
/// up the conventional env var for its backend (`OPENAI_API_KEY`, …).
fn apply_env_overrides(mut config: Config) -> Config {
    // Assistant settings
    if let Ok(val) = std::env::var("STUDYBUDDY_ASSISTANT__MAX_OUTPUT_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.assistant.max_output_tokens = n;
        }
    }
    if let Ok(val) = std::env::var("STUDYBUDDY_ASSISTANT__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.assistant.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("STUDYBUDDY_ASSISTANT__ATTEMPT_TIMEOUT_SECONDS") {
        if let Ok(n) = val.parse::<u64>() {
            config.assistant.attempt_timeout_seconds = n;
        }
    }
    if let Ok(val) = std::env::var("STUDYBUDDY_ASSISTANT__FALLBACK_ORDER") {
        let order: Vec<String> = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !order.is_empty() {
            config.assistant.fallback_order = order;
        }
    }

    // Provider settings (by provider name)
    apply_provider_env(&mut config.providers.openai, "OPENAI");
    apply_provider_env(&mut config.providers.gemini, "GEMINI");
    apply_provider_env(&mut config.providers.groq, "GROQ");

    // Conventional credential env vars as last resort
    apply_conventional_key(&mut config.providers.openai, "OPENAI_API_KEY");
    apply_conventional_key(&mut config.providers.gemini, "GEMINI_API_KEY");
    apply_conventional_key(&mut config.providers.groq, "GROQ_API_KEY");
    if config.transcription.api_key.is_empty() {
        if let Ok(val) = std::env::var("GROQ_API_KEY") {
            config.transcription.api_key = val;
        }
    }

    config
}

/// Apply `STUDYBUDDY_PROVIDERS__*` env var overrides for a single provider.
fn apply_provider_env(provider: &mut ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("STUDYBUDDY_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Ok(val) = std::env::var(format!("STUDYBUDDY_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
    if let Ok(val) = std::env::var(format!("STUDYBUDDY_PROVIDERS__{name}__MODEL")) {
        provider.model = Some(val);
    }
}

/// Fill in a missing API key from the backend's conventional env var.
fn apply_conventional_key(provider: &mut ProviderConfig, env_key: &str) {
    if provider.api_key.is_empty() {
        if let Ok(val) = std::env::var(env_key) {
            provider.api_key = val;
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
