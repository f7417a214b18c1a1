//! Core types shared by the library and the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Default for Level {
    fn default() -> Self {
        Self::Easy
    }
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Get the level name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// Learning activity a result is recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    SoundRecognition,
    WordListening,
    StoryTime,
    FollowingInstructions,
    PhoneticPractice,
    SentencePractice,
    Vocabulary,
    Comprehension,
    FlashCards,
}

impl Activity {
    /// Label shown in history and progress views.
    pub fn label(self) -> &'static str {
        match self {
            Self::SoundRecognition => "Sound Recognition",
            Self::WordListening => "Word Listening",
            Self::StoryTime => "Story Time",
            Self::FollowingInstructions => "Instructions",
            Self::PhoneticPractice => "Phonetic Practice",
            Self::SentencePractice => "Sentence Practice",
            Self::Vocabulary => "Vocabulary",
            Self::Comprehension => "Comprehension",
            Self::FlashCards => "Flash Cards",
        }
    }
}

/// Result of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn from_correct(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Incorrect }
    }

    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

/// Streak badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    QuickLearner,
    MasterListener,
}

impl Badge {
    /// Badge earned when a streak reaches exactly `streak`.
    pub fn for_streak(streak: u32) -> Option<Self> {
        match streak {
            5 => Some(Self::QuickLearner),
            10 => Some(Self::MasterListener),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::QuickLearner => "🌟 Quick Learner",
            Self::MasterListener => "🏆 Master Listener",
        }
    }
}

/// One recorded attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub activity: Activity,
    pub level: Level,
    pub result: Outcome,
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    /// Accuracy score compared against a pass mark.
    Dictation,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Dictation
    }
}
