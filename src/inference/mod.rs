//! ONNX Runtime backend for the trained emotion classifier.
//!
//! The network is the Keras model the service was trained with, exported
//! to ONNX. It takes a `[1, max_len]` token-id tensor and returns one
//! probability per emotion class.

mod model;

pub use model::OnnxEmotionModel;

use crate::predict::ClassifierError;

/// Inference error types
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("ONNX runtime error: {0}")]
    Onnx(String),

    #[error("Unsupported model input: {0}")]
    UnsupportedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InferenceError> for ClassifierError {
    fn from(err: InferenceError) -> Self {
        ClassifierError::Inference(err.to_string())
    }
}
