//! Studybuddy CLI — entry point.
//!
//! # Commands
//!
//! - `studybuddy explain TOPIC` — explain a topic in simple terms
//! - `studybuddy ask QUESTION` — free-form question
//! - `studybuddy summarize [TEXT|-f FILE]` — summarize notes
//! - `studybuddy quiz TOPIC [-n N]` — interactive quiz
//! - `studybuddy flashcards TOPIC [-n N]` — flashcard set
//! - `studybuddy voice FILE` — transcribe audio and answer it
//! - `studybuddy profile` — view or update the study profile
//! - `studybuddy status` — show configuration and provider status

mod helpers;
mod profile_cmd;
mod quiz_cmd;
mod status;
mod voice;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use studybuddy_core::config::load_config;
use studybuddy_study::{StudyAssistant, UserProfile};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🎓 Studybuddy — AI study assistant with provider fallback
#[derive(Parser)]
#[command(name = "studybuddy", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain a topic in simple terms with examples
    Explain {
        /// Topic to explain
        topic: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Ask a free-form question
    Ask {
        /// The question
        question: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Summarize notes or pasted text
    Summarize {
        /// Text to summarize (omit when using --file)
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long)]
        file: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Take a quiz on a topic
    Quiz {
        /// Quiz topic
        topic: String,

        /// Number of questions
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Print questions and answers without the interactive prompt
        #[arg(long, default_value_t = false)]
        show_answers: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Generate flashcards for a topic
    Flashcards {
        /// Flashcard topic
        topic: String,

        /// Number of cards
        #[arg(short = 'n', long, default_value_t = 8)]
        count: usize,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Transcribe an audio question and answer it
    Voice {
        /// Path to the audio file (wav, mp3, m4a, ogg, ...)
        file: String,

        /// Only transcribe, don't answer
        #[arg(long, default_value_t = false)]
        transcribe_only: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// View or update the study profile
    Profile {
        #[command(flatten)]
        update: profile_cmd::ProfileUpdate,
    },

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Explain { topic, logs } => {
            init_logging(logs);
            let assistant = build_assistant();
            let result = assistant.explain(&topic).await;
            helpers::print_result(&result);
            Ok(())
        }
        Commands::Ask { question, logs } => {
            init_logging(logs);
            let assistant = build_assistant();
            let result = assistant.ask(&question).await;
            helpers::print_result(&result);
            Ok(())
        }
        Commands::Summarize { text, file, logs } => {
            init_logging(logs);
            let input = match (text, file) {
                (Some(t), _) => t,
                (None, Some(path)) => {
                    let path = helpers::expand_tilde(&path);
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("cannot read {}", path.display()))?
                }
                (None, None) => {
                    anyhow::bail!("provide text to summarize, or --file PATH");
                }
            };
            let assistant = build_assistant();
            let result = assistant.summarize(&input).await;
            helpers::print_result(&result);
            Ok(())
        }
        Commands::Quiz {
            topic,
            count,
            show_answers,
            logs,
        } => {
            init_logging(logs);
            let assistant = build_assistant();
            quiz_cmd::run(&assistant, &topic, count, show_answers).await
        }
        Commands::Flashcards { topic, count, logs } => {
            init_logging(logs);
            let assistant = build_assistant();
            run_flashcards(&assistant, &topic, count).await
        }
        Commands::Voice {
            file,
            transcribe_only,
            logs,
        } => {
            init_logging(logs);
            voice::run(&file, transcribe_only).await
        }
        Commands::Profile { update } => profile_cmd::run(update),
        Commands::Status => status::run(),
    }
}

/// Load config + profile and build the assistant.
fn build_assistant() -> StudyAssistant {
    let config = load_config(None);
    let profile = UserProfile::load(None);
    StudyAssistant::new(&config, profile)
}

// ─────────────────────────────────────────────
// Flashcards command
// ─────────────────────────────────────────────

async fn run_flashcards(assistant: &StudyAssistant, topic: &str, count: usize) -> Result<()> {
    use colored::Colorize;

    let cards = assistant
        .flashcards(topic, count)
        .await
        .context("flashcard generation failed")?;

    println!();
    println!("{} {}", "🎓 Flashcards:".cyan().bold(), topic.bold());
    println!();
    for (i, card) in cards.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).dimmed(), card.term.bold());
        println!("     {}", card.definition);
        println!();
    }
    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("studybuddy=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
