//! Flashcard generation — prompt contract and response parsing.
//!
//! Same strict-JSON approach as quiz generation:
//! `{"cards":[{"term":"...","definition":"..."}]}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quiz::extract_json_object;

/// A single term/definition flashcard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

/// Errors from parsing a model reply into flashcards.
#[derive(Debug, Error)]
pub enum FlashcardParseError {
    #[error("no JSON object found in response")]
    NoJson,

    #[error("invalid flashcard JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no flashcards in response")]
    Empty,
}

#[derive(Deserialize)]
struct FlashcardSet {
    cards: Vec<Flashcard>,
}

/// Build the flashcard generation prompt for `n` cards about `topic`.
pub fn flashcard_prompt(topic: &str, n: usize) -> String {
    format!(
        "Create {n} flashcards to revise {topic}. Each should have a term and definition. \
         Return ONLY valid JSON like this:\n\
         {{\"cards\":[{{\"term\":\"...\",\"definition\":\"...\"}}]}}\n\
         Do not include explanations or any extra text outside JSON."
    )
}

/// Parse a raw model reply into a non-empty list of flashcards.
///
/// Cards with an empty term or definition are dropped rather than
/// failing the whole set.
pub fn parse_flashcards(raw: &str) -> Result<Vec<Flashcard>, FlashcardParseError> {
    let json_text = extract_json_object(raw).ok_or(FlashcardParseError::NoJson)?;
    let set: FlashcardSet = serde_json::from_str(json_text)?;

    let cards: Vec<Flashcard> = set
        .cards
        .into_iter()
        .filter(|c| !c.term.trim().is_empty() && !c.definition.trim().is_empty())
        .collect();

    if cards.is_empty() {
        return Err(FlashcardParseError::Empty);
    }
    Ok(cards)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_prompt_contract() {
        let p = flashcard_prompt("cell biology", 3);
        assert!(p.contains("3 flashcards"));
        assert!(p.contains("cell biology"));
        assert!(p.contains(r#""definition""#));
    }

    #[test]
    fn test_parse_clean_json() {
        let raw = r#"{"cards":[
            {"term":"Osmosis","definition":"Movement of water across a membrane."},
            {"term":"Diffusion","definition":"Movement from high to low concentration."}
        ]}"#;
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].term, "Osmosis");
    }

    #[test]
    fn test_parse_wrapped_in_code_fence() {
        let raw = "```json\n{\"cards\":[{\"term\":\"ATP\",\"definition\":\"Energy currency of the cell.\"}]}\n```";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_parse_drops_blank_cards() {
        let raw = r#"{"cards":[
            {"term":"","definition":"orphan definition"},
            {"term":"Valid","definition":"Kept."}
        ]}"#;
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].term, "Valid");
    }

    #[test]
    fn test_parse_all_blank_is_empty() {
        let raw = r#"{"cards":[{"term":" ","definition":""}]}"#;
        let err = parse_flashcards(raw).unwrap_err();
        assert!(matches!(err, FlashcardParseError::Empty));
    }

    #[test]
    fn test_parse_no_json() {
        let err = parse_flashcards("Here are your flashcards: ...").unwrap_err();
        assert!(matches!(err, FlashcardParseError::NoJson));
    }
}
