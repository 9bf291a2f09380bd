//! `studybuddy profile` — view or update the study profile.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use studybuddy_study::profile::get_profile_path;
use studybuddy_study::UserProfile;

/// Profile fields settable from the command line. With no flags the
/// command just prints the current profile.
#[derive(Args, Debug, Default)]
pub struct ProfileUpdate {
    /// The student's name
    #[arg(long)]
    pub name: Option<String>,

    /// School grade or level
    #[arg(long)]
    pub grade: Option<String>,

    /// Subjects being studied (free text)
    #[arg(long)]
    pub subjects: Option<String>,

    /// Study goal (free text)
    #[arg(long)]
    pub goal: Option<String>,
}

impl ProfileUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.grade.is_none()
            && self.subjects.is_none()
            && self.goal.is_none()
    }

    fn apply(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(grade) = self.grade {
            profile.grade = grade;
        }
        if let Some(subjects) = self.subjects {
            profile.subjects = subjects;
        }
        if let Some(goal) = self.goal {
            profile.goal = goal;
        }
    }
}

/// Run the profile command.
pub fn run(update: ProfileUpdate) -> Result<()> {
    let mut profile = UserProfile::load(None);

    if !update.is_empty() {
        update.apply(&mut profile);
        profile.save(None).context("could not save profile")?;
        println!();
        println!("  {} profile saved", "✓".green());
    }

    println!();
    println!("{}", "🎓 Study Profile".cyan().bold());
    println!();
    print_field("Name:", &profile.name);
    print_field("Grade:", &profile.grade);
    print_field("Subjects:", &profile.subjects);
    print_field("Goal:", &profile.goal);
    println!();
    println!(
        "  {:<12} {}",
        "File:".bold(),
        get_profile_path().display().to_string().dimmed()
    );

    if let Some(summary) = profile.context_summary() {
        println!();
        println!("  {}", summary.dimmed());
    } else {
        println!();
        println!(
            "  {}",
            "Empty profile — set fields with --name, --grade, --subjects, --goal.".dimmed()
        );
    }
    println!();
    Ok(())
}

fn print_field(label: &str, value: &str) {
    if value.is_empty() {
        println!("  {:<12} {}", label.bold(), "(not set)".dimmed());
    } else {
        println!("  {:<12} {value}", label.bold());
    }
}
