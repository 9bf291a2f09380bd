//! Quiz generation — prompt contract and response parsing.
//!
//! The model is asked for strict JSON
//! (`{"questions":[{"question","options","answer_index"}]}`), but replies
//! routinely arrive wrapped in prose or markdown code fences, so the
//! parser extracts the first balanced JSON object from the raw text
//! before deserializing, then validates the structure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single multiple-choice question.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

impl QuizQuestion {
    /// The text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.answer_index]
    }
}

/// A generated quiz.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

/// Errors from parsing a model reply into a quiz.
#[derive(Debug, Error)]
pub enum QuizParseError {
    #[error("no JSON object found in response")]
    NoJson,

    #[error("invalid quiz JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("quiz has no questions")]
    Empty,

    #[error("question {index} is malformed: {reason}")]
    BadQuestion { index: usize, reason: String },
}

/// Build the quiz generation prompt for `n` questions about `topic`.
pub fn quiz_prompt(topic: &str, n: usize) -> String {
    format!(
        "Create {n} multiple-choice questions about {topic}. \
         Return ONLY valid JSON like this:\n\
         {{\"questions\":[{{\"question\":\"...\",\"options\":[\"A\",\"B\",\"C\",\"D\"],\"answer_index\":0}}]}}\n\
         Do not include explanations or any extra text outside JSON."
    )
}

/// Parse a raw model reply into a validated [`Quiz`].
pub fn parse_quiz(raw: &str) -> Result<Quiz, QuizParseError> {
    let json_text = extract_json_object(raw).ok_or(QuizParseError::NoJson)?;
    let quiz: Quiz = serde_json::from_str(json_text)?;

    if quiz.questions.is_empty() {
        return Err(QuizParseError::Empty);
    }
    for (index, q) in quiz.questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            return Err(QuizParseError::BadQuestion {
                index,
                reason: "empty question text".into(),
            });
        }
        if q.options.len() < 2 {
            return Err(QuizParseError::BadQuestion {
                index,
                reason: format!("only {} option(s)", q.options.len()),
            });
        }
        if q.answer_index >= q.options.len() {
            return Err(QuizParseError::BadQuestion {
                index,
                reason: format!(
                    "answer_index {} out of range for {} options",
                    q.answer_index,
                    q.options.len()
                ),
            });
        }
    }
    Ok(quiz)
}

/// Extract the first balanced `{ ... }` object from a raw reply.
///
/// Brace scanning rather than a regex: replies may contain nested objects
/// and braces inside JSON strings.
pub(crate) fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
