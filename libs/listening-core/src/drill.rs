//! Dictation drills: sentence practice and phonetic spelling.
//!
//! A drill owns the transient state of one exercise (the item being
//! practiced and whether it was already checked) and reports results into
//! the learner's session.

use crate::diff::{char_diff, DiffSegment};
use crate::error::DrillError;
use crate::sampling::{pick_any, pick_next};
use crate::scoring::{compare_answers, score};
use crate::session::LearnerSession;
use crate::types::{Activity, Badge, MatchingMode};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Score at or above which a typed sentence counts as correct.
pub const SENTENCE_PASS_MARK: f64 = 90.0;

/// How a drill grades answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrillKind {
    /// Type a whole sentence; graded by accuracy score, checked once per item.
    Sentence { pass_mark: f64 },
    /// Spell a single word; exact case-insensitive match, may be retried.
    Spelling,
}

impl DrillKind {
    pub fn sentence() -> Self {
        Self::Sentence {
            pass_mark: SENTENCE_PASS_MARK,
        }
    }

    pub fn activity(&self) -> Activity {
        match self {
            Self::Sentence { .. } => Activity::SentencePractice,
            Self::Spelling => Activity::PhoneticPractice,
        }
    }

    /// Points added to the session score for a correct answer.
    pub fn points(&self) -> u32 {
        match self {
            Self::Sentence { .. } => 2,
            Self::Spelling => 1,
        }
    }

    fn single_check(&self) -> bool {
        matches!(self, Self::Sentence { .. })
    }
}

/// Outcome of checking one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    /// Accuracy score of the answer against the reference, 0 to 100.
    pub accuracy: f64,
    pub reference: String,
    /// Character diff, only for incorrect answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Vec<DiffSegment>>,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

/// Transient state of one dictation exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictationDrill {
    kind: DrillKind,
    pool: Vec<String>,
    current: Option<String>,
    checked: bool,
    last_accuracy: Option<f64>,
    correct_count: u32,
}

impl DictationDrill {
    pub fn new(kind: DrillKind, pool: Vec<String>) -> Self {
        Self {
            kind,
            pool,
            current: None,
            checked: false,
            last_accuracy: None,
            correct_count: 0,
        }
    }

    pub fn kind(&self) -> DrillKind {
        self.kind
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn last_accuracy(&self) -> Option<f64> {
        self.last_accuracy
    }

    /// Correct answers given in this drill.
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Move to a random item different from the current one.
    ///
    /// Returns `None` and keeps the current item when no other item exists.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&str> {
        let next = match self.current.as_ref() {
            Some(current) => pick_next(&self.pool, Some(current), rng),
            None => pick_any(&self.pool, rng),
        }?
        .clone();

        self.set_current(next);
        self.current()
    }

    /// Practice a specific item from the pool.
    pub fn select(&mut self, item: &str) -> Result<(), DrillError> {
        if !self.pool.iter().any(|candidate| candidate == item) {
            return Err(DrillError::NotInPool {
                item: item.to_string(),
            });
        }
        self.set_current(item.to_string());
        Ok(())
    }

    /// Swap in a new pool (level or phoneme change). Clears the current item.
    pub fn replace_pool(&mut self, pool: Vec<String>) {
        self.pool = pool;
        self.current = None;
        self.checked = false;
        self.last_accuracy = None;
    }

    /// Grade `input` against the current item and record it in `session`.
    pub fn check(
        &mut self,
        input: &str,
        session: &mut LearnerSession,
        now: DateTime<Utc>,
    ) -> Result<Feedback, DrillError> {
        let reference = self.current.clone().ok_or(DrillError::NoActiveItem)?;
        if self.checked && self.kind.single_check() {
            return Err(DrillError::AlreadyChecked);
        }

        let result = match self.kind {
            DrillKind::Sentence { pass_mark } => {
                compare_answers(input, &reference, MatchingMode::Dictation, pass_mark)
            }
            DrillKind::Spelling => {
                compare_answers(input, &reference, MatchingMode::CaseInsensitive, 100.0)
            }
        };
        let accuracy = match result.matching_mode {
            MatchingMode::Dictation => result.score,
            _ => score(&reference, input),
        };

        let points = if result.is_correct {
            self.correct_count += 1;
            session.add_points(self.kind.points());
            self.kind.points()
        } else {
            0
        };
        let badge = session.record_attempt(self.kind.activity(), result.is_correct, now);

        self.checked = true;
        self.last_accuracy = Some(accuracy);

        tracing::debug!(
            activity = self.kind.activity().label(),
            correct = result.is_correct,
            accuracy,
            "checked answer"
        );

        Ok(Feedback {
            correct: result.is_correct,
            accuracy,
            diff: (!result.is_correct).then(|| char_diff(input, &reference)),
            reference,
            points,
            badge,
        })
    }

    fn set_current(&mut self, item: String) {
        self.current = Some(item);
        self.checked = false;
        self.last_accuracy = None;
    }
}
