//! Dictation drill endpoints: sentence practice and phonetic spelling

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use listening_core::{ContentError, DictationDrill, DrillError, LearnerSession};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::routes::json_or_default;
use crate::AppState;

/// POST /api/sessions/:id/sentence/next
pub async fn next_sentence(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NextItemResponse>> {
    let response = state
        .sessions
        .with_session(id, |slot| {
            if slot.sentences.pool().is_empty() {
                return Err(ContentError::EmptyPool {
                    kind: "sentences",
                    level: slot.learner.level,
                }
                .into());
            }
            Ok(advance(&mut slot.sentences))
        })
        .await?;

    Ok(Json(response))
}

/// POST /api/sessions/:id/sentence/check
pub async fn check_sentence(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>> {
    let response = state
        .sessions
        .with_session(id, |slot| {
            check(&mut slot.sentences, &mut slot.learner, &payload.input)
        })
        .await?;

    Ok(Json(response))
}

/// POST /api/sessions/:id/phonetic/next
/// Switches phoneme when given, then selects `word` or a random different word.
/// The body is optional.
pub async fn next_word(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<PhoneticNextResponse>> {
    let request: PhoneticNextRequest = json_or_default(&body)?;
    let catalog = state.catalog.clone();

    let response = state
        .sessions
        .with_session(id, |slot| {
            let phoneme = match request.phoneme.or_else(|| slot.phoneme.clone()) {
                Some(phoneme) => phoneme,
                None => catalog
                    .phonemes(slot.learner.level)
                    .first()
                    .map(|p| p.to_string())
                    .ok_or(ContentError::EmptyPool {
                        kind: "phonemes",
                        level: slot.learner.level,
                    })?,
            };

            // Reject the word before the drill changes.
            let words = catalog.words(slot.learner.level, &phoneme)?;
            if let Some(word) = &request.word {
                if !words.contains(word) {
                    return Err(DrillError::NotInPool { item: word.clone() }.into());
                }
            }
            slot.choose_phoneme(&phoneme, &catalog)?;

            let next = match request.word {
                Some(word) => {
                    slot.spelling.select(&word)?;
                    NextItemResponse {
                        item: Some(word),
                        changed: true,
                    }
                }
                None => advance(&mut slot.spelling),
            };

            Ok(PhoneticNextResponse {
                phoneme,
                words: slot.spelling.pool().to_vec(),
                item: next.item,
                changed: next.changed,
            })
        })
        .await?;

    Ok(Json(response))
}

/// POST /api/sessions/:id/phonetic/check
pub async fn check_word(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>> {
    let response = state
        .sessions
        .with_session(id, |slot| {
            check(&mut slot.spelling, &mut slot.learner, &payload.input)
        })
        .await?;

    Ok(Json(response))
}

fn advance(drill: &mut DictationDrill) -> NextItemResponse {
    let mut rng = rand::thread_rng();
    match drill.advance(&mut rng) {
        Some(item) => NextItemResponse {
            item: Some(item.to_string()),
            changed: true,
        },
        None => NextItemResponse {
            item: drill.current().map(str::to_string),
            changed: false,
        },
    }
}

fn check(
    drill: &mut DictationDrill,
    learner: &mut LearnerSession,
    input: &str,
) -> Result<CheckResponse> {
    let feedback = drill.check(input, learner, Utc::now())?;
    if let Some(badge) = feedback.badge {
        tracing::info!("Session {} earned {}", learner.id, badge.label());
    }

    Ok(CheckResponse {
        feedback,
        session_score: learner.score,
        streak: learner.streak,
        success_rate: learner.success_rate(drill.kind().activity()),
    })
}
