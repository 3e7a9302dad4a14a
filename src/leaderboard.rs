//! Process-local high scores and the end-of-round submission form.

use crate::constants::{INITIALS_MAX, LEADERBOARD_SIZE};
use crate::error::SubmissionError;

/// What gets handed to the lead-capture collaborator when a round ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub initials: String,
    pub full_name: String,
    pub email: String,
    pub score: u32,
}

/// External receiver of finished scores. Delivery is fire-and-forget: the
/// session returns to idle whatever this reports.
pub trait ScoreSink {
    fn submit_score(&mut self, submission: &ScoreSubmission) -> Result<(), SubmissionError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    entries: Vec<HighScore>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        let seeded = [("FK", 15000), ("P.Dev", 8500), ("HR", 4000)];
        Self {
            entries: seeded
                .iter()
                .map(|(name, score)| HighScore {
                    name: name.to_string(),
                    score: *score,
                })
                .collect(),
        }
    }
}

impl Leaderboard {
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    /// Inserts a score, keeping the best five. Equal scores keep arrival order.
    pub fn record(&mut self, name: &str, score: u32) {
        self.entries.push(HighScore {
            name: name.to_string(),
            score,
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_SIZE);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Initials,
    FullName,
    Email,
}

#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub initials: String,
    pub full_name: String,
    pub email: String,
    pub focus: FormField,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        Self {
            initials: String::new(),
            full_name: String::new(),
            email: String::new(),
            focus: FormField::Initials,
        }
    }
}

impl SubmissionForm {
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Initials => {
                if c.is_whitespace() {
                    return;
                }
                // Some letters upper-case to more than one char.
                self.initials.extend(c.to_uppercase());
                self.initials = self.initials.chars().take(INITIALS_MAX).collect();
            }
            FormField::FullName => self.full_name.push(c),
            FormField::Email => self.email.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Initials => self.initials.pop(),
            FormField::FullName => self.full_name.pop(),
            FormField::Email => self.email.pop(),
        };
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Initials => FormField::FullName,
            FormField::FullName => FormField::Email,
            FormField::Email => FormField::Initials,
        };
    }

    pub fn is_complete(&self) -> bool {
        self.build(0).is_ok()
    }

    pub fn build(&self, score: u32) -> Result<ScoreSubmission, SubmissionError> {
        let initials: String = self
            .initials
            .trim()
            .to_uppercase()
            .chars()
            .take(INITIALS_MAX)
            .collect();
        let full_name = self.full_name.trim();
        let email = self.email.trim();
        if initials.is_empty() {
            return Err(SubmissionError::MissingInitials);
        }
        if full_name.is_empty() {
            return Err(SubmissionError::MissingName);
        }
        if email.is_empty() {
            return Err(SubmissionError::MissingEmail);
        }
        Ok(ScoreSubmission {
            initials,
            full_name: full_name.to_string(),
            email: email.to_string(),
            score,
        })
    }
}
