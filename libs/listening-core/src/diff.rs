//! Visual diffs between a typed answer and the correct answer.
//!
//! Tokens present only in the correct answer are [`DiffType::Added`] (what
//! the learner missed); tokens present only in the typed answer are
//! [`DiffType::Removed`].

use crate::matcher::{OpTag, SequenceMatcher};
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Tag of a diff token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    /// Text is the same in both strings.
    Same,
    /// Text was added (in correct but not typed).
    Added,
    /// Text was removed (in typed but not correct).
    Removed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSegment {
    pub text: String,
    pub diff_type: DiffType,
}

impl DiffSegment {
    fn new(text: impl Into<String>, diff_type: DiffType) -> Self {
        Self {
            text: text.into(),
            diff_type,
        }
    }
}

/// Character-level diff of the lowercased strings, one segment per character.
pub fn char_diff(typed: &str, correct: &str) -> Vec<DiffSegment> {
    let typed: Vec<char> = typed.to_lowercase().chars().collect();
    let correct: Vec<char> = correct.to_lowercase().chars().collect();

    edit_script(&typed, &correct)
        .into_iter()
        .map(|edit| match edit {
            Edit::Same(i) => DiffSegment::new(typed[i], DiffType::Same),
            Edit::Removed(i) => DiffSegment::new(typed[i], DiffType::Removed),
            Edit::Added(j) => DiffSegment::new(correct[j], DiffType::Added),
        })
        .collect()
}

/// Word-level diff, compared case-insensitively, one segment per word.
///
/// Segments keep the original spelling of the side they come from.
pub fn word_diff(typed: &str, correct: &str) -> Vec<DiffSegment> {
    let typed_words: Vec<&str> = typed.split_whitespace().collect();
    let correct_words: Vec<&str> = correct.split_whitespace().collect();
    let typed_keys: Vec<String> = typed_words.iter().map(|w| w.to_lowercase()).collect();
    let correct_keys: Vec<String> = correct_words.iter().map(|w| w.to_lowercase()).collect();

    edit_script(&typed_keys, &correct_keys)
        .into_iter()
        .map(|edit| match edit {
            Edit::Same(i) => DiffSegment::new(typed_words[i], DiffType::Same),
            Edit::Removed(i) => DiffSegment::new(typed_words[i], DiffType::Removed),
            Edit::Added(j) => DiffSegment::new(correct_words[j], DiffType::Added),
        })
        .collect()
}

/// Merge runs of segments with the same tag, joining their text with `separator`.
pub fn coalesce(segments: &[DiffSegment], separator: &str) -> Vec<DiffSegment> {
    let mut merged: Vec<DiffSegment> = Vec::new();
    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.diff_type == segment.diff_type => {
                last.text.push_str(separator);
                last.text.push_str(&segment.text);
            }
            _ => merged.push(segment.clone()),
        }
    }
    merged
}

/// Edit referring to an index in the typed (`Same`, `Removed`) or correct
/// (`Added`) sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Same(usize),
    Removed(usize),
    Added(usize),
}

fn edit_script<T: Eq + Hash>(typed: &[T], correct: &[T]) -> Vec<Edit> {
    let matcher = SequenceMatcher::new(typed, correct);
    let mut edits = Vec::with_capacity(typed.len().max(correct.len()));

    for op in matcher.opcodes() {
        match op.tag {
            OpTag::Equal => edits.extend((op.a_start..op.a_end).map(Edit::Same)),
            OpTag::Delete => edits.extend((op.a_start..op.a_end).map(Edit::Removed)),
            OpTag::Insert => edits.extend((op.b_start..op.b_end).map(Edit::Added)),
            OpTag::Replace => replace_region(
                typed,
                (op.a_start, op.a_end),
                correct,
                (op.b_start, op.b_end),
                &mut edits,
            ),
        }
    }

    edits
}

/// Expand a replaced region. An identical pair inside it (left behind when
/// popular elements were dropped from the index) is kept as `Same` and the
/// region is split around the first one found.
fn replace_region<T: Eq>(
    typed: &[T],
    (a_lo, a_hi): (usize, usize),
    correct: &[T],
    (b_lo, b_hi): (usize, usize),
    edits: &mut Vec<Edit>,
) {
    let sync = (b_lo..b_hi)
        .find_map(|j| (a_lo..a_hi).find(|&i| typed[i] == correct[j]).map(|i| (i, j)));

    match sync {
        Some((i, j)) => {
            split_region(typed, (a_lo, i), correct, (b_lo, j), edits);
            edits.push(Edit::Same(i));
            split_region(typed, (i + 1, a_hi), correct, (j + 1, b_hi), edits);
        }
        None => {
            let removed = (a_lo..a_hi).map(Edit::Removed);
            let added = (b_lo..b_hi).map(Edit::Added);
            // Shorter correct side goes first.
            if b_hi - b_lo < a_hi - a_lo {
                edits.extend(added);
                edits.extend(removed);
            } else {
                edits.extend(removed);
                edits.extend(added);
            }
        }
    }
}

fn split_region<T: Eq>(
    typed: &[T],
    (a_lo, a_hi): (usize, usize),
    correct: &[T],
    (b_lo, b_hi): (usize, usize),
    edits: &mut Vec<Edit>,
) {
    if a_lo < a_hi && b_lo < b_hi {
        replace_region(typed, (a_lo, a_hi), correct, (b_lo, b_hi), edits);
    } else if a_lo < a_hi {
        edits.extend((a_lo..a_hi).map(Edit::Removed));
    } else if b_lo < b_hi {
        edits.extend((b_lo..b_hi).map(Edit::Added));
    }
}
