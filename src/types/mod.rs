//! Request and response types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::emotion::{Emotion, EmotionInfo};
use crate::predict::{PredictionSource, TokenizerOrigin};

/// Confidence shown on the result page when the query has none
pub const DEFAULT_RESULT_CONFIDENCE: u8 = 75;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub tokenizer_loaded: bool,
    pub tokenizer_source: TokenizerOrigin,
    pub uptime_seconds: u64,
    pub timestamp: String,
}

/// Body of `POST /predict`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Song lyrics to classify
    #[serde(default)]
    pub lyrics: String,
}

/// Successful prediction
/// Note: Only Serialize is derived since `emotion_info` borrows the static table.
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub emotion: Emotion,
    pub confidence: f32,
    pub emotion_info: &'static EmotionInfo,
    /// Which prediction path answered
    pub source: PredictionSource,
    pub timestamp: String,
}

/// Query string of the result page.
///
/// Both fields are kept raw so bad values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultQuery {
    pub emotion: Option<String>,
    pub confidence: Option<String>,
}

impl ResultQuery {
    /// Build from decoded query pairs. The first occurrence of a key wins;
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "emotion" => &mut query.emotion,
                "confidence" => &mut query.confidence,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Resolve to a known emotion and a confidence in `0..=100`.
    ///
    /// Unknown emotions become `bahagia`; a missing or non-integer
    /// confidence becomes 75; integers outside the range are clamped.
    pub fn resolve(&self) -> (Emotion, u8) {
        let emotion = self
            .emotion
            .as_deref()
            .and_then(|e| e.parse().ok())
            .unwrap_or_default();

        let confidence = self
            .confidence
            .as_deref()
            .and_then(|c| c.trim().parse::<i128>().ok())
            .map(|c| c.clamp(0, 100) as u8)
            .unwrap_or(DEFAULT_RESULT_CONFIDENCE);

        (emotion, confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(emotion: Option<&str>, confidence: Option<&str>) -> ResultQuery {
        ResultQuery {
            emotion: emotion.map(str::to_string),
            confidence: confidence.map(str::to_string),
        }
    }

    #[test]
    fn test_result_query_defaults() {
        assert_eq!(query(None, None).resolve(), (Emotion::Happy, 75));
        assert_eq!(
            query(Some("unknown"), Some("abc")).resolve(),
            (Emotion::Happy, 75)
        );
    }

    #[test]
    fn test_result_query_valid() {
        assert_eq!(query(Some("takut"), Some("88")).resolve(), (Emotion::Fearful, 88));
        assert_eq!(query(Some("sedih"), Some(" 61 ")).resolve(), (Emotion::Sad, 61));
    }

    #[test]
    fn test_result_query_clamps() {
        assert_eq!(query(Some("marah"), Some("150")).resolve(), (Emotion::Angry, 100));
        assert_eq!(query(Some("marah"), Some("-5")).resolve(), (Emotion::Angry, 0));
        assert_eq!(
            query(None, Some("99999999999999999999")).resolve(),
            (Emotion::Happy, 100)
        );
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_result_query_first_value_wins() {
        let query = ResultQuery::from_pairs(pairs(&[
            ("emotion", "sedih"),
            ("emotion", "marah"),
            ("confidence", "80"),
            ("confidence", "10"),
            ("page", "2"),
        ]));
        assert_eq!(query.emotion.as_deref(), Some("sedih"));
        assert_eq!(query.resolve(), (Emotion::Sad, 80));
    }

    #[test]
    fn test_result_query_from_no_pairs() {
        let query = ResultQuery::from_pairs(Vec::new());
        assert_eq!(query, ResultQuery::default());
        assert_eq!(query.resolve(), (Emotion::Happy, 75));
    }

    #[test]
    fn test_result_query_rejects_fractions() {
        assert_eq!(query(None, Some("80.5")).resolve(), (Emotion::Happy, 75));
    }

    #[test]
    fn test_predict_request_default_lyrics() {
        let req: PredictRequest = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(req.lyrics, "");
    }

    #[test]
    fn test_predict_response_shape() {
        let resp = PredictResponse {
            success: true,
            emotion: Emotion::Sad,
            confidence: 82.0,
            emotion_info: Emotion::Sad.info(),
            source: PredictionSource::Heuristic,
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["emotion"], "sedih");
        assert_eq!(json["emotion_info"]["name"], "Sedih");
        assert!(json["emotion_info"]["keywords"].is_array());
    }
}
