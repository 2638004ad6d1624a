//! Emotion prediction from lyrics.
//!
//! The trained classifier is tried first; any failure degrades to the
//! keyword heuristic, so [`predict`] always produces an answer.

pub mod classifier;
pub mod heuristic;
mod normalize;
pub mod tokenizer;

pub use classifier::{
    classify, ClassifierBundle, ClassifierError, SequenceClassifier, TokenizerOrigin,
};
pub use normalize::normalize;
pub use tokenizer::{pad_sequence, Tokenizer};

use std::ops::Range;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::emotion::Emotion;

/// Confidence band reported for classifier predictions
pub const MODEL_CONFIDENCE_MIN: f32 = 60.0;
pub const MODEL_CONFIDENCE_MAX: f32 = 95.0;

/// Confidence band reported when keywords were found
pub const KEYWORD_CONFIDENCE_MIN: f32 = 70.0;
pub const KEYWORD_CONFIDENCE_MAX: f32 = 95.0;

/// Additive jitter on keyword confidence (half-open)
pub const KEYWORD_JITTER: Range<u32> = 5..15;

/// Confidence drawn when no keyword matched (half-open)
pub const NO_SIGNAL_CONFIDENCE: Range<u32> = 45..65;

/// Which path produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    Classifier,
    Heuristic,
}

/// An emotion label with a percentage confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub emotion: Emotion,
    pub confidence: f32,
    pub source: PredictionSource,
}

/// Predict the emotion of `text`, falling back to keyword scoring when the
/// classifier is missing or fails.
pub fn predict<R: Rng>(bundle: &ClassifierBundle, text: &str, rng: &mut R) -> Prediction {
    let normalized = normalize(text);

    match classify(bundle, &normalized) {
        Ok(prediction) => prediction,
        Err(ClassifierError::ModelUnavailable) => {
            debug!("No classifier loaded, using keyword heuristic");
            heuristic::predict(&normalized, rng)
        }
        Err(e) => {
            warn!(error = %e, "Classifier prediction failed, using keyword heuristic");
            heuristic::predict(&normalized, rng)
        }
    }
}
