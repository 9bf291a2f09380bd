//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use studybuddy_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Fallback order: {:?}", cfg.assistant.fallback_order);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config, save_config};
pub use schema::{AssistantConfig, Config, ProviderConfig, ProvidersConfig};
