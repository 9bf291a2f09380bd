//! Studybuddy study layer — everything between the CLI and the provider
//! dispatcher.
//!
//! This crate contains:
//! - **profile**: the user's learning profile and its prompt context
//! - **prompts**: prompt builders for explain/summarize/answer
//! - **quiz**: quiz prompt + strict-JSON response parsing
//! - **flashcards**: flashcard prompt + strict-JSON response parsing
//! - **assistant**: the `StudyAssistant` facade that routes every
//!   operation through the fallback dispatcher

pub mod assistant;
pub mod flashcards;
pub mod profile;
pub mod prompts;
pub mod quiz;

pub use assistant::StudyAssistant;
pub use flashcards::Flashcard;
pub use profile::UserProfile;
pub use quiz::{Quiz, QuizQuestion};
