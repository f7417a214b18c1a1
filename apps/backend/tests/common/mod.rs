#![allow(dead_code)]

//! Common test utilities and fixtures for integration tests.
//!
//! The router runs against the bundled catalog and a stub speech provider,
//! so no network access is needed.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::Value;

use listening_core::{AudioClip, Catalog, SpeechError, SpeechSpeed, SpeechSynthesizer};
use listening_hub_backend::{router, AppState};

/// Speech provider that returns fixed bytes.
pub struct StubSpeech;

impl SpeechSynthesizer for StubSpeech {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn synthesize(&self, text: &str, speed: SpeechSpeed) -> Result<AudioClip, SpeechError> {
        let tag = match speed {
            SpeechSpeed::Normal => "normal",
            SpeechSpeed::Slow => "slow",
        };
        Ok(AudioClip::mp3(format!("{}:{}", tag, text).into_bytes()))
    }
}

/// Speech provider that always fails.
pub struct OfflineSpeech;

impl SpeechSynthesizer for OfflineSpeech {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn synthesize(&self, _text: &str, _speed: SpeechSpeed) -> Result<AudioClip, SpeechError> {
        Err(SpeechError::Network("connection refused".to_string()))
    }
}

/// Test context holding the application state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a context with the bundled catalog and [`StubSpeech`].
    pub fn new() -> Self {
        Self::with_speech(Arc::new(StubSpeech))
    }

    pub fn with_speech(speech: Arc<dyn SpeechSynthesizer>) -> Self {
        let catalog = Catalog::builtin().expect("bundled catalog should parse");
        Self::with_catalog(catalog, speech)
    }

    pub fn with_catalog(catalog: Catalog, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        let state = AppState::new(catalog, speech);
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to build test server")
    }
}

/// Start a session at `level` and return its id.
pub async fn start_session(server: &TestServer, level: &str) -> String {
    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_request(level))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["session_id"]
        .as_str()
        .expect("session_id should be a string")
        .to_string()
}
