//! Practice content: sentences and phoneme word groups per level.
//!
//! # Format
//! ```json
//! {
//!   "sentences": { "easy": ["The cat sits on the mat."] },
//!   "phonemes": {
//!     "easy": [{ "phoneme": "th", "words": ["this", "that"] }]
//!   }
//! }
//! ```

use crate::error::{ContentError, Result};
use crate::types::Level;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Words sharing a sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemeGroup {
    pub phoneme: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    sentences: HashMap<Level, Vec<String>>,
    #[serde(default)]
    phonemes: HashMap<Level, Vec<PhonemeGroup>>,
}

impl Catalog {
    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Dictation sentences for a level. Errors when there are none.
    pub fn sentences(&self, level: Level) -> Result<&[String]> {
        self.sentences
            .get(&level)
            .filter(|pool| !pool.is_empty())
            .map(Vec::as_slice)
            .ok_or(ContentError::EmptyPool {
                kind: "sentences",
                level,
            })
    }

    /// Phoneme groups for a level, in catalog order.
    pub fn phoneme_groups(&self, level: Level) -> &[PhonemeGroup] {
        self.phonemes.get(&level).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn phonemes(&self, level: Level) -> Vec<&str> {
        self.phoneme_groups(level)
            .iter()
            .map(|group| group.phoneme.as_str())
            .collect()
    }

    /// Words for one phoneme. Errors on an unknown phoneme or an empty group.
    pub fn words(&self, level: Level, phoneme: &str) -> Result<&[String]> {
        let group = self
            .phoneme_groups(level)
            .iter()
            .find(|group| group.phoneme == phoneme)
            .ok_or_else(|| ContentError::UnknownPhoneme {
                phoneme: phoneme.to_string(),
                level,
            })?;

        if group.words.is_empty() {
            return Err(ContentError::EmptyPool {
                kind: "words",
                level,
            });
        }
        Ok(&group.words)
    }
}
