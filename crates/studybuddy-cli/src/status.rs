//! `studybuddy status` — show configuration and provider status.
//!
//! - Shows config path, fallback order, request parameters
//! - Shows API key status for each provider and for transcription

use anyhow::Result;
use colored::Colorize;

use studybuddy_core::config::load_config;
use studybuddy_core::utils::get_data_path;
use studybuddy_providers::registry::PROVIDERS;
use studybuddy_study::profile::get_profile_path;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let data_dir = get_data_path();
    let config_path = data_dir.join("config.json");

    println!();
    println!("{}", "🎓 Studybuddy Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Profile
    let profile_path = get_profile_path();
    let profile_exists = profile_path.exists();
    println!(
        "  {:<18} {} {}",
        "Profile:".bold(),
        profile_path.display(),
        if profile_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Fallback order
    println!(
        "  {:<18} {}",
        "Fallback order:".bold(),
        config.assistant.fallback_order.join(" → ")
    );

    // Request parameters
    println!(
        "  {:<18} {} | max_tokens: {} | timeout: {}s",
        "Parameters:".bold(),
        format!("temp: {}", config.assistant.temperature).dimmed(),
        format!("{}", config.assistant.max_output_tokens).dimmed(),
        format!("{}", config.assistant.attempt_timeout_seconds).dimmed(),
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    let providers_map = config.providers.to_map();

    for spec in PROVIDERS {
        let configured = providers_map
            .get(spec.name)
            .is_some_and(|c| c.is_configured());
        let status = if configured {
            format!("{} (key set)", "✓".green())
        } else {
            format!("{}", format!("· not configured (set {})", spec.env_key).dimmed())
        };
        println!("    {:<20} {}", spec.display_name, status);
    }

    // Transcription
    println!();
    let transcription_status = if !config.transcription.enabled {
        format!("{}", "· disabled".dimmed())
    } else if config.transcription.api_key.is_empty() {
        format!("{}", "· not configured".dimmed())
    } else {
        format!("{} ({})", "✓".green(), config.transcription.model)
    };
    println!("  {:<18} {}", "Transcription:".bold(), transcription_status);

    println!();

    Ok(())
}
