//! Core listening-practice library shared by the backend and any UI layer.
//!
//! Provides:
//! - Accuracy scoring for dictation answers (word alignment + matcher ratio)
//! - Character and word diffs for feedback
//! - Learner sessions (score, streak, badges, history)
//! - Dictation drills and next-item sampling
//! - Content catalog and the text-to-speech seam

pub mod catalog;
pub mod diff;
pub mod drill;
pub mod error;
pub mod matcher;
pub mod sampling;
pub mod scoring;
pub mod session;
pub mod speech;
pub mod types;

pub use catalog::{Catalog, PhonemeGroup};
pub use diff::{char_diff, coalesce, word_diff, DiffSegment, DiffType};
pub use drill::{DictationDrill, DrillKind, Feedback, SENTENCE_PASS_MARK};
pub use error::{ContentError, DrillError, Result};
pub use sampling::{pick_any, pick_next};
pub use scoring::{compare_answers, score, score_breakdown, MatchResult, ScoreBreakdown};
pub use session::{LearnerSession, SessionStats, SessionSummary};
pub use speech::{narrate, AudioClip, Narration, SpeechError, SpeechSpeed, SpeechSynthesizer};
pub use types::{Activity, Badge, HistoryEntry, Level, MatchingMode, Outcome};
