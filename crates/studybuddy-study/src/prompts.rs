//! Prompt builders for the study assistant's text operations.
//!
//! Kept as plain functions so every prompt string lives in one place and
//! parser tests can pin the JSON contracts the prompts promise.

/// System persona used for all study operations.
pub const PERSONA: &str =
    "You are a friendly AI Study Buddy who explains concepts clearly.";

/// Prompt for explaining a topic.
pub fn explain(topic: &str) -> String {
    format!("Explain {topic} simply with examples.")
}

/// Prompt for summarizing extracted or pasted text.
pub fn summarize(text: &str) -> String {
    format!("Summarize or explain this text in simple terms:\n{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_mentions_topic() {
        let p = explain("photosynthesis");
        assert!(p.contains("photosynthesis"));
        assert!(p.contains("simply"));
    }

    #[test]
    fn test_summarize_includes_text() {
        let p = summarize("The mitochondria is the powerhouse of the cell.");
        assert!(p.contains("mitochondria"));
        assert!(p.starts_with("Summarize"));
    }
}
