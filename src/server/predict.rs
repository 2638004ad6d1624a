//! Emotion prediction route handler.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::{AppError, Result};
use crate::predict as predictor;
use crate::types::{PredictRequest, PredictResponse};
use crate::validate::validate_lyrics;

use super::extractors::{JsonBody, NO_DATA_MESSAGE};
use super::routes::timestamp;
use super::AppState;

/// POST /predict
///
/// Classify the emotion of the submitted lyrics.
pub async fn predict(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<PredictResponse>> {
    let req = parse_request(body)?;
    let lyrics = req.lyrics.trim().to_string();

    if let Err(e) = validate_lyrics(&lyrics) {
        debug!(reason = ?e, len = lyrics.len(), "Lyrics rejected");
        return Err(e.into());
    }

    let mut rng = state.fork_rng()?;
    let bundle = state.bundle.clone();
    let prediction =
        tokio::task::spawn_blocking(move || predictor::predict(&bundle, &lyrics, &mut rng))
            .await
            .map_err(|e| {
                error!(error = %e, "Prediction task panicked");
                AppError::Internal(format!("Join error: {e}"))
            })?;

    info!(
        emotion = %prediction.emotion,
        confidence = prediction.confidence,
        source = ?prediction.source,
        "Prediction successful"
    );

    Ok(Json(PredictResponse {
        success: true,
        emotion: prediction.emotion,
        confidence: prediction.confidence,
        emotion_info: prediction.emotion.info(),
        source: prediction.source,
        timestamp: timestamp(),
    }))
}

/// A body that is `null`, an empty object or not an object carries no data.
fn parse_request(body: Value) -> Result<PredictRequest> {
    let no_data = || AppError::BadRequest(NO_DATA_MESSAGE.to_string());

    match &body {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Err(no_data()),
    }

    serde_json::from_value(body).map_err(|e| {
        debug!(error = %e, "Invalid predict request");
        no_data()
    })
}
