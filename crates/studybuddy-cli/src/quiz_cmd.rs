//! `studybuddy quiz` — generate and take a quiz.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use studybuddy_study::{Quiz, StudyAssistant};

/// Run the quiz command.
pub async fn run(
    assistant: &StudyAssistant,
    topic: &str,
    count: usize,
    show_answers: bool,
) -> Result<()> {
    let quiz = assistant
        .quiz(topic, count)
        .await
        .context("quiz generation failed")?;

    println!();
    println!("{} {}", "🎓 Quiz:".cyan().bold(), topic.bold());
    println!();

    if show_answers {
        print_with_answers(&quiz);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut score = 0usize;

    for (i, q) in quiz.questions.iter().enumerate() {
        println!("{} {}", format!("Q{}.", i + 1).bold(), q.question);
        for (j, option) in q.options.iter().enumerate() {
            println!("   {}) {}", letter(j), option);
        }

        let picked = loop {
            print!("{}", "Your answer: ".dimmed());
            io::stdout().flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(()), // stdin closed, stop quietly
            };
            match parse_answer(&line, q.options.len()) {
                Some(index) => break index,
                None => println!(
                    "   {}",
                    format!("pick a letter a-{}", letter(q.options.len() - 1)).yellow()
                ),
            }
        };

        if picked == q.answer_index {
            score += 1;
            println!("   {}", "✓ correct!".green());
        } else {
            println!(
                "   {} the answer was {}) {}",
                "✗".red(),
                letter(q.answer_index),
                q.correct_option()
            );
        }
        println!();
    }

    println!(
        "{}",
        format!("Score: {score}/{}", quiz.questions.len()).bold()
    );
    println!();
    Ok(())
}

fn print_with_answers(quiz: &Quiz) {
    for (i, q) in quiz.questions.iter().enumerate() {
        println!("{} {}", format!("Q{}.", i + 1).bold(), q.question);
        for (j, option) in q.options.iter().enumerate() {
            if j == q.answer_index {
                println!("   {}) {} {}", letter(j), option, "✓".green());
            } else {
                println!("   {}) {}", letter(j), option);
            }
        }
        println!();
    }
}

fn letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Accept "a", "B)", " c " etc.; also a bare 1-based number.
fn parse_answer(input: &str, options: usize) -> Option<usize> {
    let cleaned = input.trim().trim_end_matches(')').to_lowercase();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.len() == 1 {
        let c = cleaned.chars().next()?;
        if c.is_ascii_lowercase() {
            let index = (c as u8 - b'a') as usize;
            return (index < options).then_some(index);
        }
    }
    if let Ok(n) = cleaned.parse::<usize>() {
        if n >= 1 && n <= options {
            return Some(n - 1);
        }
    }
    None
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
