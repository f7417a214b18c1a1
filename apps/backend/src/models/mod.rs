//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from listening-core
pub use listening_core::{
    Activity, Badge, DiffSegment, DictationDrill, Feedback, HistoryEntry, Level, PhonemeGroup,
    ScoreBreakdown, SessionStats, SessionSummary,
};

/// History entries returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

// === Scoring ===

/// Request to score a typed answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub reference: String,
    pub candidate: String,
}

/// Score plus the character diff used for feedback
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
    pub diff: Vec<DiffSegment>,
}

/// Token size of a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffGranularity {
    #[default]
    Char,
    Word,
}

/// Request for a visual diff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffRequest {
    pub candidate: String,
    pub reference: String,
    #[serde(default)]
    pub granularity: DiffGranularity,
    /// Merge adjacent segments with the same tag
    #[serde(default)]
    pub coalesce: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffResponse {
    pub segments: Vec<DiffSegment>,
}

// === Sessions ===

/// Optional body for starting a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub level: Option<Level>,
}

/// Progress of one drill
#[derive(Debug, Clone, Serialize)]
pub struct DrillState {
    pub current: Option<String>,
    pub checked: bool,
    pub last_accuracy: Option<f64>,
    pub correct_count: u32,
}

impl From<&DictationDrill> for DrillState {
    fn from(drill: &DictationDrill) -> Self {
        Self {
            current: drill.current().map(str::to_string),
            checked: drill.is_checked(),
            last_accuracy: drill.last_accuracy(),
            correct_count: drill.correct_count(),
        }
    }
}

/// Phonetic drill progress and the selected phoneme
#[derive(Debug, Clone, Serialize)]
pub struct PhoneticState {
    pub phoneme: Option<String>,
    #[serde(flatten)]
    pub drill: DrillState,
}

/// Session snapshot for the progress dashboard
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub level: Level,
    pub score: u32,
    pub streak: u32,
    pub badges: Vec<Badge>,
    pub stats: SessionStats,
    pub started_at: DateTime<Utc>,
    pub elapsed_secs: i64,
    pub sentence: DrillState,
    pub phonetic: PhoneticState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLevelRequest {
    pub level: Level,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub total: usize,
}

/// Result of an activity graded outside the drills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAttemptRequest {
    pub activity: Activity,
    pub correct: bool,
    #[serde(default)]
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordAttemptResponse {
    pub badge: Option<Badge>,
    pub score: u32,
    pub streak: u32,
}

// === Drills ===

/// The item to practice after a "next" request
#[derive(Debug, Clone, Serialize)]
pub struct NextItemResponse {
    pub item: Option<String>,
    /// False when no different item was available
    pub changed: bool,
}

/// Choose a phoneme group and optionally a word in it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhoneticNextRequest {
    pub phoneme: Option<String>,
    pub word: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhoneticNextResponse {
    pub phoneme: String,
    pub words: Vec<String>,
    pub item: Option<String>,
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub input: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub session_score: u32,
    pub streak: u32,
    /// Success rate (0..=1) for this activity so far
    pub success_rate: Option<f64>,
}

// === Content and speech ===

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub level: Level,
    pub sentences: Vec<String>,
    pub phonemes: Vec<PhonemeGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    #[serde(default)]
    pub slow: bool,
}
