//! Shared CLI helpers — path expansion, response printing.

use std::path::PathBuf;

use colored::Colorize;

use studybuddy_providers::{DispatchResult, OutcomeClass};

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print a dispatch result: the answer tagged with the provider that
/// produced it, or the terminal failure message.
pub fn print_result(result: &DispatchResult) {
    println!();
    // Surface fallthroughs so the user knows a backup answered.
    for attempt in &result.attempts {
        if attempt.outcome != OutcomeClass::Succeeded {
            println!(
                "{}",
                format!("({} {}, trying next)", attempt.provider, attempt.outcome).dimmed()
            );
        }
    }
    match (result.text(), result.provider()) {
        (Some(text), Some(provider)) => {
            println!(
                "{} {}",
                "🎓 Study Buddy".cyan().bold(),
                format!("(via {provider})").dimmed()
            );
            println!("{text}");
        }
        _ => {
            let message = result
                .failure_message()
                .unwrap_or("AI service unavailable. Please try again later.");
            println!("{}", message.red());
        }
    }
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
