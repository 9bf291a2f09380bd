//! Chat provider layer for Studybuddy.
//!
//! # Architecture
//!
//! - [`traits::ChatProvider`] — trait that all providers implement
//! - [`registry`] — static specs for the supported backends + chain building
//! - [`http_provider::HttpProvider`] — generic OpenAI-compatible HTTP client
//! - [`dispatcher::FallbackDispatcher`] — ordered primary → backup dispatch,
//!   the piece everything above routes through
//! - [`transcription`] — speech-to-text for the voice assistant

pub mod dispatcher;
pub mod error;
pub mod http_provider;
pub mod registry;
pub mod traits;
pub mod transcription;

// Re-export main types for convenience
pub use dispatcher::{
    AttemptEvent, DispatchOutcome, DispatchRequest, DispatchResult, FallbackDispatcher,
};
pub use error::{OutcomeClass, ProviderError};
pub use http_provider::HttpProvider;
pub use registry::{build_chain, ProviderSpec, PROVIDERS};
pub use traits::{ChatProvider, RequestConfig};
pub use transcription::{GroqTranscriber, TranscriptionProvider};
