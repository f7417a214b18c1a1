//! Accuracy scoring for dictation-style answers.
//!
//! A candidate is scored against a reference as the mean of two
//! percentages:
//! - word accuracy: index-aligned words that match, over the reference
//!   word count
//! - character accuracy: the matcher ratio `2 * M / T` over the full
//!   lowercased strings
//!
//! The reference is expected to be non-empty. An empty reference scores 0
//! for the word component.

use crate::matcher::SequenceMatcher;
use crate::types::MatchingMode;
use serde::{Deserialize, Serialize};

/// Both accuracy components and their mean, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub word_accuracy: f64,
    pub char_accuracy: f64,
    pub score: f64,
}

/// Score a candidate against a reference, in `[0, 100]`.
pub fn score(reference: &str, candidate: &str) -> f64 {
    score_breakdown(reference, candidate).score
}

/// Score a candidate and keep both components.
///
/// A blank candidate scores 0 across the board.
pub fn score_breakdown(reference: &str, candidate: &str) -> ScoreBreakdown {
    if candidate.trim().is_empty() {
        return ScoreBreakdown::default();
    }

    let word_accuracy = word_accuracy(reference, candidate);
    let char_accuracy = char_accuracy(reference, candidate);
    let breakdown = ScoreBreakdown {
        word_accuracy,
        char_accuracy,
        score: (word_accuracy + char_accuracy) / 2.0,
    };

    tracing::debug!(
        word_accuracy = breakdown.word_accuracy,
        char_accuracy = breakdown.char_accuracy,
        score = breakdown.score,
        "scored answer"
    );
    breakdown
}

/// Percentage of reference words matched at the same position.
pub fn word_accuracy(reference: &str, candidate: &str) -> f64 {
    let reference_words = lowercase_words(reference);
    if reference_words.is_empty() {
        return 0.0;
    }

    let matches = lowercase_words(candidate)
        .iter()
        .zip(&reference_words)
        .filter(|(typed, correct)| typed == correct)
        .count();

    matches as f64 / reference_words.len() as f64 * 100.0
}

/// Matcher ratio between the lowercased strings, as a percentage.
pub fn char_accuracy(reference: &str, candidate: &str) -> f64 {
    let typed: Vec<char> = candidate.to_lowercase().chars().collect();
    let correct: Vec<char> = reference.to_lowercase().chars().collect();
    SequenceMatcher::new(&typed, &correct).ratio() * 100.0
}

fn lowercase_words(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_lowercase).collect()
}

/// Result of comparing a typed answer to the correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Score between 0 and 100.
    pub score: f64,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized correct answer (for display).
    pub correct_normalized: String,
}

/// Compare a typed answer to the correct answer.
///
/// `pass_mark` only applies to [`MatchingMode::Dictation`].
pub fn compare_answers(
    typed: &str,
    correct: &str,
    mode: MatchingMode,
    pass_mark: f64,
) -> MatchResult {
    let typed_normalized = normalize_whitespace(typed);
    let correct_normalized = normalize_whitespace(correct);

    let (is_correct, score) = match mode {
        MatchingMode::Exact => all_or_nothing(typed_normalized == correct_normalized),
        MatchingMode::CaseInsensitive => all_or_nothing(
            typed_normalized.to_lowercase() == correct_normalized.to_lowercase(),
        ),
        MatchingMode::Dictation => {
            let score = score(correct, typed);
            (score >= pass_mark, score)
        }
    };

    MatchResult {
        is_correct,
        score,
        matching_mode: mode,
        typed_normalized,
        correct_normalized,
    }
}

fn all_or_nothing(is_correct: bool) -> (bool, f64) {
    (is_correct, if is_correct { 100.0 } else { 0.0 })
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
