//! Per-learner session state.
//!
//! A session is created with [`LearnerSession::start`], mutated only
//! through its transition methods, and consumed by
//! [`LearnerSession::finish`], which returns the final summary.

use crate::types::{Activity, Badge, HistoryEntry, Level, Outcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// State of one learning visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerSession {
    pub id: Uuid,
    pub level: Level,
    pub score: u32,
    pub streak: u32,
    pub history: Vec<HistoryEntry>,
    pub badges: BTreeSet<Badge>,
    pub started_at: DateTime<Utc>,
}

/// Aggregate numbers for a progress view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub attempts: usize,
    pub correct: usize,
    /// Percentage of correct attempts; `None` before the first attempt.
    pub accuracy: Option<f64>,
    pub streak: u32,
    pub score: u32,
}

/// What is left of a session once it ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub level: Level,
    pub stats: SessionStats,
    pub badges: Vec<Badge>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: i64,
}

impl LearnerSession {
    /// Start a fresh session at the easiest level.
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level: Level::default(),
            score: 0,
            streak: 0,
            history: Vec::new(),
            badges: BTreeSet::new(),
            started_at: now,
        }
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Record the result of an attempt at the current level.
    ///
    /// Returns the badge earned by this attempt, if any. Each badge is
    /// awarded at most once per session.
    pub fn record_attempt(&mut self, activity: Activity, correct: bool, now: DateTime<Utc>) -> Option<Badge> {
        let mut earned = None;
        if correct {
            self.streak += 1;
            if let Some(badge) = Badge::for_streak(self.streak) {
                if self.badges.insert(badge) {
                    earned = Some(badge);
                }
            }
        } else {
            self.streak = 0;
        }

        self.history.push(HistoryEntry {
            timestamp: now,
            activity,
            level: self.level,
            result: Outcome::from_correct(correct),
        });

        earned
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn stats(&self) -> SessionStats {
        let attempts = self.history.len();
        let correct = self
            .history
            .iter()
            .filter(|entry| entry.result.is_correct())
            .count();
        let accuracy = (attempts > 0).then(|| correct as f64 / attempts as f64 * 100.0);

        SessionStats {
            attempts,
            correct,
            accuracy,
            streak: self.streak,
            score: self.score,
        }
    }

    /// Fraction (0..=1) of correct attempts at one activity.
    pub fn success_rate(&self, activity: Activity) -> Option<f64> {
        let (attempts, correct) = self
            .history
            .iter()
            .filter(|entry| entry.activity == activity)
            .fold((0usize, 0usize), |(attempts, correct), entry| {
                (attempts + 1, correct + usize::from(entry.result.is_correct()))
            });
        (attempts > 0).then(|| correct as f64 / attempts as f64)
    }

    /// The last `n` history entries, oldest first.
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.started_at
    }

    /// End the session.
    pub fn finish(self, now: DateTime<Utc>) -> SessionSummary {
        SessionSummary {
            id: self.id,
            level: self.level,
            stats: self.stats(),
            badges: self.badges.iter().copied().collect(),
            started_at: self.started_at,
            finished_at: now,
            elapsed_secs: self.elapsed(now).num_seconds(),
        }
    }
}
