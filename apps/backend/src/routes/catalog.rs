//! Content catalog endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/catalog/:level
pub async fn get_level(
    State(state): State<AppState>,
    Path(level): Path<Level>,
) -> Result<Json<CatalogResponse>> {
    let sentences = state.catalog.sentences(level)?.to_vec();

    Ok(Json(CatalogResponse {
        level,
        sentences,
        phonemes: state.catalog.phoneme_groups(level).to_vec(),
    }))
}
