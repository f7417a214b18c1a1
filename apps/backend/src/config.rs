//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Sessions idle this long are dropped.
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON catalog to load instead of the bundled one.
    pub catalog_path: Option<PathBuf>,
    /// 0 keeps sessions until they are finished.
    pub session_idle_secs: u64,
    pub tts: TtsConfig,
}

/// Text-to-speech provider settings.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub endpoint: String,
    pub lang: String,
    pub timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TTS_ENDPOINT.to_string(),
            lang: "en".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Env vars:
    /// - HOST (default "0.0.0.0"), PORT (default 3000)
    /// - CATALOG_PATH: optional content catalog JSON
    /// - SESSION_IDLE_SECS (default 1800, 0 disables expiry)
    /// - TTS_ENDPOINT, TTS_LANG (default "en"), TTS_TIMEOUT_SECS (default 10)
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = TtsConfig::default();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_number("PORT", 3000)?,
            catalog_path: std::env::var_os("CATALOG_PATH").map(PathBuf::from),
            session_idle_secs: env_number("SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?,
            tts: TtsConfig {
                endpoint: std::env::var("TTS_ENDPOINT").unwrap_or(defaults.endpoint),
                lang: std::env::var("TTS_LANG").unwrap_or(defaults.lang),
                timeout_secs: env_number("TTS_TIMEOUT_SECS", defaults.timeout_secs)?,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Idle limit for sessions, `None` when expiry is disabled.
    pub fn session_idle(&self) -> Option<Duration> {
        (self.session_idle_secs > 0).then(|| Duration::from_secs(self.session_idle_secs))
    }
}

fn env_number<T: FromStr>(key: &str, default: T) -> anyhow::Result<T> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} must be a number, got {value:?}")),
        Err(_) => Ok(default),
    }
}
