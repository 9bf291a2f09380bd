//! `studybuddy voice` — transcribe an audio question and answer it.

use anyhow::{Context, Result};
use colored::Colorize;

use studybuddy_core::config::load_config;
use studybuddy_providers::transcription::{is_audio_file, GroqTranscriber, TranscriptionProvider};
use studybuddy_study::{StudyAssistant, UserProfile};

use crate::helpers;

/// Run the voice command.
pub async fn run(file: &str, transcribe_only: bool) -> Result<()> {
    let path = helpers::expand_tilde(file);
    if !path.exists() {
        anyhow::bail!("audio file not found: {}", path.display());
    }
    if !is_audio_file(&path.to_string_lossy()) {
        anyhow::bail!("not a supported audio file: {}", path.display());
    }

    let config = load_config(None);
    if !config.transcription.enabled {
        anyhow::bail!("transcription is disabled in config");
    }

    let transcriber = GroqTranscriber::new(&config.transcription.api_key, &config.transcription.model);
    if !transcriber.is_configured() {
        anyhow::bail!("transcription needs an API key (set GROQ_API_KEY)");
    }

    eprintln!("{}", "transcribing...".dimmed());
    let text = transcriber
        .transcribe(&path)
        .await
        .context("transcription failed")?;
    if text.trim().is_empty() {
        anyhow::bail!("transcription came back empty");
    }

    println!();
    println!("{} {}", "🎤 You said:".cyan().bold(), text.trim());

    if transcribe_only {
        println!();
        return Ok(());
    }

    let profile = UserProfile::load(None);
    let assistant = StudyAssistant::new(&config, profile);
    let result = assistant.ask(text.trim()).await;
    helpers::print_result(&result);
    Ok(())
}
