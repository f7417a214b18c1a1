//! Session lifecycle and progress endpoints

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use listening_core::LearnerSession;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::routes::json_or_default;
use crate::services::sessions::SessionSlot;
use crate::AppState;

/// POST /api/sessions
/// Starts a new learner session. The body is optional.
pub async fn start(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionResponse>> {
    let payload: StartSessionRequest = json_or_default(&body)?;
    let now = Utc::now();
    let mut learner = LearnerSession::start(now);
    if let Some(level) = payload.level {
        learner.set_level(level);
    }

    let slot = SessionSlot::new(learner, &state.catalog);
    let view = session_view(&slot);
    let id = state.sessions.insert(slot).await;

    tracing::info!("Started session {} at level {}", id, view.level);

    Ok(Json(view))
}

/// GET /api/sessions/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let view = state.sessions.read(id, session_view).await?;
    Ok(Json(view))
}

/// DELETE /api/sessions/:id
/// Ends the session and returns its summary
pub async fn finish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>> {
    let slot = state.sessions.remove(id).await?;
    let summary = slot.learner.finish(Utc::now());

    tracing::info!(
        "Finished session {} ({} attempts, score {})",
        id,
        summary.stats.attempts,
        summary.stats.score
    );

    Ok(Json(summary))
}

/// PUT /api/sessions/:id/level
pub async fn update_level(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLevelRequest>,
) -> Result<Json<SessionResponse>> {
    let catalog = state.catalog.clone();
    let view = state
        .sessions
        .with_session(id, |slot| {
            if slot.learner.level != payload.level {
                slot.set_level(payload.level, &catalog);
            }
            Ok(session_view(slot))
        })
        .await?;

    Ok(Json(view))
}

/// GET /api/sessions/:id/history
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let response = state
        .sessions
        .read(id, |slot| HistoryResponse {
            entries: slot.learner.recent(limit).to_vec(),
            total: slot.learner.history.len(),
        })
        .await?;

    Ok(Json(response))
}

/// POST /api/sessions/:id/attempts
/// Records an activity graded by the UI
pub async fn record_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordAttemptRequest>,
) -> Result<Json<RecordAttemptResponse>> {
    let response = state
        .sessions
        .with_session(id, |slot| {
            let badge = slot
                .learner
                .record_attempt(payload.activity, payload.correct, Utc::now());
            if payload.correct {
                slot.learner.add_points(payload.points);
            }
            Ok(RecordAttemptResponse {
                badge,
                score: slot.learner.score,
                streak: slot.learner.streak,
            })
        })
        .await?;

    if let Some(badge) = response.badge {
        tracing::info!("Session {} earned {}", id, badge.label());
    }

    Ok(Json(response))
}

fn session_view(slot: &SessionSlot) -> SessionResponse {
    let learner = &slot.learner;
    SessionResponse {
        session_id: learner.id,
        level: learner.level,
        score: learner.score,
        streak: learner.streak,
        badges: learner.badges.iter().copied().collect(),
        stats: learner.stats(),
        started_at: learner.started_at,
        elapsed_secs: learner.elapsed(Utc::now()).num_seconds(),
        sentence: DrillState::from(&slot.sentences),
        phonetic: PhoneticState {
            phoneme: slot.phoneme.clone(),
            drill: DrillState::from(&slot.spelling),
        },
    }
}
