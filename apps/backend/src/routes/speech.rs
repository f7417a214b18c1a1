//! Text-to-speech endpoint

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use listening_core::{narrate, Narration, SpeechSpeed};

use crate::error::{ApiError, Result};
use crate::models::SpeechRequest;
use crate::AppState;

/// POST /api/speech
/// Returns the audio bytes, or 503 with a message the UI can show
pub async fn synthesize(
    State(state): State<AppState>,
    Json(payload): Json<SpeechRequest>,
) -> Result<Response> {
    let speech = state.speech.clone();
    let speed = SpeechSpeed::from_slow(payload.slow);

    let narration = tokio::task::spawn_blocking(move || {
        narrate(speech.as_ref(), &payload.text, speed)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("speech task failed: {}", e)))?;

    match narration {
        Narration::Ready(clip) => Ok(([(CONTENT_TYPE, clip.content_type)], clip.bytes).into_response()),
        Narration::Unavailable { message } => Err(ApiError::SpeechUnavailable(message)),
    }
}
