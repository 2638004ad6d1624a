//! Trained-classifier prediction path.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::tokenizer::{pad_sequence, Tokenizer};
use super::{Prediction, PredictionSource, MODEL_CONFIDENCE_MAX, MODEL_CONFIDENCE_MIN};
use crate::config::ModelConfig;
use crate::emotion::Emotion;

/// Why the classifier could not produce a prediction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("no classifier model loaded")]
    ModelUnavailable,

    #[error("classifier returned no probabilities")]
    EmptyOutput,

    #[error("classifier output is invalid: {0}")]
    InvalidOutput(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// A model mapping a padded token-id sequence to class probabilities.
///
/// Class `i` corresponds to `Emotion::from_class_index(i)`.
pub trait SequenceClassifier: Send + Sync {
    fn predict_proba(&self, token_ids: &[i64]) -> Result<Vec<f32>, ClassifierError>;
}

/// Where the tokenizer vocabulary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerOrigin {
    /// Loaded from the artifact directory
    Artifact,
    /// Fitted on the built-in sample sentences
    Bootstrap,
}

/// Classifier artifacts, built once at startup and shared read-only.
#[derive(Clone)]
pub struct ClassifierBundle {
    model: Option<Arc<dyn SequenceClassifier>>,
    tokenizer: Tokenizer,
    tokenizer_origin: TokenizerOrigin,
    max_len: usize,
}

impl std::fmt::Debug for ClassifierBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierBundle")
            .field("model_loaded", &self.model.is_some())
            .field("tokenizer_origin", &self.tokenizer_origin)
            .field("vocab_size", &self.tokenizer.vocab_size())
            .field("max_len", &self.max_len)
            .finish()
    }
}

impl ClassifierBundle {
    pub fn new(
        model: Option<Arc<dyn SequenceClassifier>>,
        tokenizer: Tokenizer,
        tokenizer_origin: TokenizerOrigin,
        max_len: usize,
    ) -> Self {
        Self {
            model,
            tokenizer,
            tokenizer_origin,
            max_len,
        }
    }

    /// No model and the bootstrap vocabulary. Every prediction takes the
    /// keyword path.
    pub fn unloaded(config: &ModelConfig) -> Self {
        Self::new(
            None,
            Tokenizer::bootstrap(config.num_words),
            TokenizerOrigin::Bootstrap,
            config.max_len,
        )
    }

    /// Load the model and tokenizer artifacts.
    ///
    /// Never fails: a missing tokenizer falls back to the bootstrap
    /// vocabulary, a missing model leaves the bundle without one, and any
    /// load error discards both.
    pub fn load(config: &ModelConfig) -> Self {
        let model = match load_model(config) {
            Ok(model) => model,
            Err(e) => {
                error!(error = %e, "Error loading classifier model");
                return Self::unloaded(config);
            }
        };

        let tokenizer_path = config.tokenizer_path();
        if !tokenizer_path.exists() {
            info!(path = %tokenizer_path.display(), "Tokenizer not found, using bootstrap vocabulary");
            return Self::new(
                model,
                Tokenizer::bootstrap(config.num_words),
                TokenizerOrigin::Bootstrap,
                config.max_len,
            );
        }

        match Tokenizer::from_json_file(&tokenizer_path, config.num_words) {
            Ok(tokenizer) => {
                info!(
                    path = %tokenizer_path.display(),
                    vocab_size = tokenizer.vocab_size(),
                    "Tokenizer loaded"
                );
                Self::new(model, tokenizer, TokenizerOrigin::Artifact, config.max_len)
            }
            Err(e) => {
                error!(error = %e, path = %tokenizer_path.display(), "Error loading tokenizer");
                Self::unloaded(config)
            }
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn tokenizer_origin(&self) -> TokenizerOrigin {
        self.tokenizer_origin
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

#[cfg(feature = "inference")]
fn load_model(
    config: &ModelConfig,
) -> Result<Option<Arc<dyn SequenceClassifier>>, crate::inference::InferenceError> {
    let path = config.model_path();
    if !path.exists() {
        warn!(path = %path.display(), "Model not found, using keyword fallback");
        return Ok(None);
    }

    let model = crate::inference::OnnxEmotionModel::load(&path, config.intra_threads)?;
    info!(path = %path.display(), "Model loaded");
    Ok(Some(Arc::new(model)))
}

#[cfg(not(feature = "inference"))]
fn load_model(
    config: &ModelConfig,
) -> Result<Option<Arc<dyn SequenceClassifier>>, std::convert::Infallible> {
    let path = config.model_path();
    if path.exists() {
        warn!(
            path = %path.display(),
            "Model file present but built without the `inference` feature, using keyword fallback"
        );
    } else {
        warn!(path = %path.display(), "Model not found, using keyword fallback");
    }
    Ok(None)
}

/// Run the trained classifier on already normalized text.
pub fn classify(bundle: &ClassifierBundle, normalized: &str) -> Result<Prediction, ClassifierError> {
    let model = bundle
        .model
        .as_ref()
        .ok_or(ClassifierError::ModelUnavailable)?;

    let ids = bundle.tokenizer.texts_to_sequence(normalized);
    let padded = pad_sequence(&ids, bundle.max_len);
    let probs = model.predict_proba(&padded)?;

    let (class, &p) = argmax(&probs)?;
    let emotion = Emotion::from_class_index(class).unwrap_or_default();
    let confidence = (p * 100.0).clamp(MODEL_CONFIDENCE_MIN, MODEL_CONFIDENCE_MAX);

    Ok(Prediction {
        emotion,
        confidence,
        source: PredictionSource::Classifier,
    })
}

/// First index holding the maximum value
fn argmax(values: &[f32]) -> Result<(usize, &f32), ClassifierError> {
    if values.is_empty() {
        return Err(ClassifierError::EmptyOutput);
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(ClassifierError::InvalidOutput(format!(
            "non-finite probability {bad}"
        )));
    }

    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    Ok((best, &values[best]))
}
