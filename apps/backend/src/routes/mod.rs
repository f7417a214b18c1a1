pub mod catalog;
pub mod drills;
pub mod scoring;
pub mod sessions;
pub mod speech;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// Parse an optional JSON body. An empty body gives `T::default()`; a body
/// that is present must parse.
pub(crate) fn json_or_default<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}
