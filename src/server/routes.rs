//! JSON route handlers.

use std::collections::BTreeMap;

use axum::{extract::State, Json};

use crate::emotion::{catalog, EmotionInfo};
use crate::types::HealthResponse;

use super::AppState;

/// Current local time as an RFC 3339 string
pub(super) fn timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Health check endpoint
///
/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.bundle.model_loaded(),
        // the bundle always carries a vocabulary, bootstrap or loaded
        tokenizer_loaded: true,
        tokenizer_source: state.bundle.tokenizer_origin(),
        uptime_seconds: state.uptime_seconds(),
        timestamp: timestamp(),
    })
}

/// Emotion table endpoint
///
/// GET /api/emotions
pub async fn emotions() -> Json<BTreeMap<&'static str, &'static EmotionInfo>> {
    Json(catalog())
}
