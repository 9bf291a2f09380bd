//! Shared foundation for Studybuddy: chat message types, configuration,
//! and path utilities used by every other crate in the workspace.

pub mod config;
pub mod types;
pub mod utils;

pub use config::{load_config, Config};
