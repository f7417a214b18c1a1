//! Text-to-speech seam.
//!
//! Synthesis is an opaque call that may fail. [`narrate`] turns a failure
//! into a user-facing message so callers never abort a session over it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playback speed requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechSpeed {
    Normal,
    Slow,
}

impl Default for SpeechSpeed {
    fn default() -> Self {
        Self::Normal
    }
}

impl SpeechSpeed {
    pub fn from_slow(slow: bool) -> Self {
        if slow { Self::Slow } else { Self::Normal }
    }
}

/// Encoded audio ready for playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl AudioClip {
    pub fn mp3(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: "audio/mpeg".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("nothing to say")]
    EmptyText,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Trait for text-to-speech providers.
pub trait SpeechSynthesizer: Send + Sync {
    /// Provider identifier.
    fn name(&self) -> &'static str;

    /// Convert `text` to audio. Blocking.
    fn synthesize(&self, text: &str, speed: SpeechSpeed) -> Result<AudioClip, SpeechError>;
}

/// Audio for a piece of text, or the message to show instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    Ready(AudioClip),
    Unavailable { message: String },
}

/// Synthesize `text`, reporting failure as [`Narration::Unavailable`].
pub fn narrate(synth: &dyn SpeechSynthesizer, text: &str, speed: SpeechSpeed) -> Narration {
    let result = if text.trim().is_empty() {
        Err(SpeechError::EmptyText)
    } else {
        synth.synthesize(text, speed)
    };

    match result {
        Ok(clip) => Narration::Ready(clip),
        Err(e) => {
            tracing::warn!(provider = synth.name(), error = %e, "speech synthesis failed");
            Narration::Unavailable {
                message: format!("Error generating audio: {}", e),
            }
        }
    }
}

/// Split text into chunks of at most `max_chars` characters, on word
/// boundaries where possible. Words longer than the limit are cut.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            chunks.extend(chars.chunks(max_chars).map(|piece| piece.iter().collect::<String>()));
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Echo;

    impl SpeechSynthesizer for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn synthesize(&self, text: &str, _speed: SpeechSpeed) -> Result<AudioClip, SpeechError> {
            Ok(AudioClip::mp3(text.as_bytes().to_vec()))
        }
    }

    struct Offline;

    impl SpeechSynthesizer for Offline {
        fn name(&self) -> &'static str {
            "offline"
        }

        fn synthesize(&self, _text: &str, _speed: SpeechSpeed) -> Result<AudioClip, SpeechError> {
            Err(SpeechError::Network("connection refused".to_string()))
        }
    }

    #[test]
    fn narrate_returns_audio() {
        let narration = narrate(&Echo, "hello", SpeechSpeed::Normal);
        assert_eq!(narration, Narration::Ready(AudioClip::mp3(b"hello".to_vec())));
    }

    #[test]
    fn narrate_reports_failures() {
        let narration = narrate(&Offline, "hello", SpeechSpeed::Slow);
        assert_eq!(
            narration,
            Narration::Unavailable {
                message: "Error generating audio: network error: connection refused".to_string()
            }
        );
    }

    #[test]
    fn narrate_rejects_blank_text() {
        let narration = narrate(&Echo, "   ", SpeechSpeed::Normal);
        assert!(matches!(narration, Narration::Unavailable { .. }));
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_text("The cat sits on the mat.", 100), vec!["The cat sits on the mat."]);
    }

    #[test]
    fn chunks_break_on_words() {
        let chunks = chunk_text("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 9));
    }

    #[test]
    fn long_words_are_cut() {
        assert_eq!(chunk_text("ab abcdefg", 3), vec!["ab", "abc", "def", "g"]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(chunk_text("  ", 100).is_empty());
    }
}
