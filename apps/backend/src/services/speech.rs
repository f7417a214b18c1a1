//! Google Translate text-to-speech provider.

use std::sync::OnceLock;
use std::time::Duration;

use listening_core::speech::chunk_text;
use listening_core::{AudioClip, SpeechError, SpeechSpeed, SpeechSynthesizer};
use reqwest::blocking::Client;

use crate::config::TtsConfig;

/// The endpoint rejects longer requests.
const MAX_CHUNK_CHARS: usize = 100;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; listening-hub)";

/// Fetches MP3 audio from the translate TTS endpoint, one request per chunk.
pub struct GoogleTranslateTts {
    config: TtsConfig,
    // Created on first use, from a blocking thread.
    client: OnceLock<Client>,
}

impl GoogleTranslateTts {
    pub fn new(config: TtsConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&Client, SpeechError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SpeechError::Config(e.to_string()))?;
        Ok(self.client.get_or_init(|| client))
    }

    fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
        speed: SpeechSpeed,
    ) -> Result<Vec<u8>, SpeechError> {
        let ttsspeed = match speed {
            SpeechSpeed::Normal => "1",
            SpeechSpeed::Slow => "0.3",
        };
        let params = [
            ("ie", "UTF-8".to_string()),
            ("client", "tw-ob".to_string()),
            ("tl", self.config.lang.clone()),
            ("q", chunk.to_string()),
            ("idx", idx.to_string()),
            ("total", total.to_string()),
            ("textlen", chunk.chars().count().to_string()),
            ("ttsspeed", ttsspeed.to_string()),
        ];

        let response = self
            .client()?
            .get(&self.config.endpoint)
            .query(&params)
            .send()
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(SpeechError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| SpeechError::Network(e.to_string()))
    }
}

impl Drop for GoogleTranslateTts {
    // The blocking client panics if dropped inside the async runtime.
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            if tokio::runtime::Handle::try_current().is_ok() {
                std::thread::spawn(move || drop(client));
            }
        }
    }
}

impl SpeechSynthesizer for GoogleTranslateTts {
    fn name(&self) -> &'static str {
        "google-translate"
    }

    fn synthesize(&self, text: &str, speed: SpeechSpeed) -> Result<AudioClip, SpeechError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, idx, chunks.len(), speed)?);
        }

        tracing::debug!(chunks = chunks.len(), bytes = audio.len(), "synthesized speech");
        Ok(AudioClip::mp3(audio))
    }
}
