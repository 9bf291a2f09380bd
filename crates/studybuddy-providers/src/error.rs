//! Provider error taxonomy and outcome classification.
//!
//! Upstream backends signal quota exhaustion in different, stringly-typed
//! ways (OpenAI returns `insufficient_quota` bodies, Gemini says
//! `RESOURCE_EXHAUSTED`, Groq `rate_limit_exceeded`). That wording is
//! interpreted exactly once, in the HTTP adapter, and folded into this
//! shared enum so the dispatcher never looks at provider-specific text.

use thiserror::Error;

/// Errors from a single chat provider attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("quota or rate limit exhausted: {0}")]
    QuotaExhausted(String),

    #[error("authentication failed (check API key): {0}")]
    Auth(String),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("provider returned an empty response")]
    EmptyResponse,
}

/// How a single provider attempt ended, as seen by the dispatcher.
///
/// Per-attempt state machine: `NotTried → {Succeeded, FailedQuota,
/// FailedOther}`; the dispatcher moves to the next provider only from a
/// `Failed*` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeClass {
    Succeeded,
    FailedQuota,
    FailedOther,
}

impl std::fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeClass::Succeeded => write!(f, "succeeded"),
            OutcomeClass::FailedQuota => write!(f, "quota exhausted"),
            OutcomeClass::FailedOther => write!(f, "failed"),
        }
    }
}

impl ProviderError {
    /// Classify this error for fallback handling.
    ///
    /// Quota exhaustion is reported separately so callers can tell the
    /// user "switching to backup model" instead of a generic failure;
    /// every class still falls through to the next provider.
    pub fn classify(&self) -> OutcomeClass {
        match self {
            ProviderError::QuotaExhausted(_) => OutcomeClass::FailedQuota,
            _ => OutcomeClass::FailedOther,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_classifies_as_quota() {
        let err = ProviderError::QuotaExhausted("429".into());
        assert_eq!(err.classify(), OutcomeClass::FailedQuota);
    }

    #[test]
    fn test_other_errors_classify_as_other() {
        let errors = [
            ProviderError::Network("connection refused".into()),
            ProviderError::Timeout,
            ProviderError::Api {
                status: 500,
                body: "internal".into(),
            },
            ProviderError::Auth("invalid key".into()),
            ProviderError::Parse("bad json".into()),
            ProviderError::EmptyResponse,
        ];
        for err in errors {
            assert_eq!(err.classify(), OutcomeClass::FailedOther);
        }
    }

    #[test]
    fn test_display_messages() {
        let err = ProviderError::Api {
            status: 503,
            body: "overloaded".into(),
        };
        assert_eq!(err.to_string(), "API error 503: overloaded");
        assert_eq!(OutcomeClass::FailedQuota.to_string(), "quota exhausted");
    }
}
