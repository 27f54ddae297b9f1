//! Question model and bank adapters

mod bank;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use bank::{QuestionBank, RemoteBank, StaticBank, demo_questions};

/// Question difficulty, ordered easy < medium < hard < expert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All levels in ascending order
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Weight used for difficulty ordering and adaptive selection
    pub fn weight(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
            Difficulty::Expert => 2.5,
        }
    }

    /// The adjacent-inclusive band around this level, clipped at the ends
    ///
    /// Widens candidate selection to one level below and one above the target.
    pub fn band(self) -> Vec<Difficulty> {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        let mut band = vec![self];
        if idx > 0 {
            band.push(Self::ALL[idx - 1]);
        }
        if idx + 1 < Self::ALL.len() {
            band.push(Self::ALL[idx + 1]);
        }
        band
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        write!(f, "{}", name)
    }
}

/// A single interview question, immutable once read from a bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Unique question identifier
    pub id: String,
    /// Question text shown to the candidate
    pub text: String,
    /// Free-form category, e.g. "System Design"
    pub category: String,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Reference answer used for keyword-overlap scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
    /// Tags weighted higher than body text during relevance ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Optional hints surfaced to the candidate on request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
}

/// Free-text hints about the candidate, used to rank question relevance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl UserContext {
    /// Lower-cased whitespace-split keywords across all supplied hints
    pub fn keywords(&self) -> HashSet<String> {
        let mut keywords = HashSet::new();
        for field in [&self.skills, &self.experience, &self.job_title] {
            if let Some(text) = field {
                keywords.extend(text.to_lowercase().split_whitespace().map(String::from));
            }
        }
        keywords
    }

    /// True when no hint fields are populated
    pub fn is_empty(&self) -> bool {
        self.skills.is_none() && self.experience.is_none() && self.job_title.is_none()
    }
}
