//! User learning profile — persisted to disk and rendered into the
//! system context prepended to each generation request.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use studybuddy_core::utils::get_data_path;

/// The user's learning profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub subjects: String,
    #[serde(default)]
    pub goal: String,
    /// Last save time (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Default profile file path (`~/.studybuddy/profile.json`).
pub fn get_profile_path() -> PathBuf {
    get_data_path().join("profile.json")
}

impl UserProfile {
    /// Whether any field has been filled in.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.grade.is_empty()
            && self.subjects.is_empty()
            && self.goal.is_empty()
    }

    /// Render the profile sentence prepended to prompts.
    ///
    /// Missing fields fall back to neutral phrasing so a half-filled
    /// profile still reads naturally. Returns `None` when nothing is set.
    pub fn context_summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let name = if self.name.is_empty() {
            "a student"
        } else {
            &self.name
        };
        let grade = if self.grade.is_empty() {
            "unknown"
        } else {
            &self.grade
        };
        let subjects = if self.subjects.is_empty() {
            "many subjects"
        } else {
            &self.subjects
        };
        let goal = if self.goal.is_empty() {
            "to learn better"
        } else {
            &self.goal
        };
        Some(format!(
            "The user is {name} in grade {grade}, studying {subjects} and wants {goal}."
        ))
    }

    /// Load the profile from a file, or default if missing/unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let profile_path = path.map(PathBuf::from).unwrap_or_else(get_profile_path);
        if !profile_path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(&profile_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(profile) => profile,
                Err(e) => {
                    warn!("Failed to parse profile JSON: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read profile file: {}", e);
                Self::default()
            }
        }
    }

    /// Save the profile to disk, stamping `updated_at`.
    pub fn save(&mut self, path: Option<&Path>) -> std::io::Result<()> {
        let profile_path = path.map(PathBuf::from).unwrap_or_else(get_profile_path);
        if let Some(parent) = profile_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.updated_at = Some(chrono::Utc::now());
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&profile_path, json)?;
        debug!("Profile saved to {}", profile_path.display());
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
