//! Scoring and diff endpoints

use axum::Json;
use listening_core::{char_diff, coalesce, score_breakdown, word_diff};

use crate::models::*;

/// POST /api/score
pub async fn score(Json(payload): Json<ScoreRequest>) -> Json<ScoreResponse> {
    let breakdown = score_breakdown(&payload.reference, &payload.candidate);
    let diff = char_diff(&payload.candidate, &payload.reference);

    Json(ScoreResponse { breakdown, diff })
}

/// POST /api/diff
pub async fn diff(Json(payload): Json<DiffRequest>) -> Json<DiffResponse> {
    let (segments, separator) = match payload.granularity {
        DiffGranularity::Char => (char_diff(&payload.candidate, &payload.reference), ""),
        DiffGranularity::Word => (word_diff(&payload.candidate, &payload.reference), " "),
    };

    let segments = if payload.coalesce {
        coalesce(&segments, separator)
    } else {
        segments
    };

    Json(DiffResponse { segments })
}
