//! Error types for listening-core.

use crate::types::Level;
use thiserror::Error;

/// Result type alias using ContentError.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors that can occur while loading or querying practice content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no {kind} available for level {level}")]
    EmptyPool { kind: &'static str, level: Level },

    #[error("unknown phoneme '{phoneme}' for level {level}")]
    UnknownPhoneme { phoneme: String, level: Level },

    #[error("invalid catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from driving a dictation drill.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrillError {
    #[error("no item is being practiced")]
    NoActiveItem,

    #[error("answer already checked for this item")]
    AlreadyChecked,

    #[error("'{item}' is not part of the current practice set")]
    NotInPool { item: String },
}
