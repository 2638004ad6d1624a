//! Emotion classifier wrapper for ONNX Runtime inference.

use std::path::Path;
use std::sync::Mutex;

use ort::session::{builder::GraphOptimizationLevel, Session, SessionInputValue};
use ort::tensor::TensorElementType;
use ort::value::{Tensor, ValueType};
use tracing::{debug, info};

use super::InferenceError;
use crate::emotion::Emotion;
use crate::predict::{ClassifierError, SequenceClassifier};

/// Element type the exported graph expects for its token ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Int64,
    Int32,
    Float32,
}

pub struct OnnxEmotionModel {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    input_kind: InputKind,
}

impl std::fmt::Debug for OnnxEmotionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmotionModel")
            .field("input", &self.input_name)
            .field("output", &self.output_name)
            .field("input_kind", &self.input_kind)
            .finish()
    }
}

impl OnnxEmotionModel {
    /// Load the classifier graph from `path`
    pub fn load(path: &Path, intra_threads: usize) -> Result<Self, InferenceError> {
        info!(path = %path.display(), "Loading emotion classifier");

        let model_bytes = std::fs::read(path)?;

        let session = Session::builder()
            .map_err(|e| InferenceError::Onnx(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Onnx(e.to_string()))?
            .with_intra_threads(intra_threads)
            .map_err(|e| InferenceError::Onnx(e.to_string()))?
            .commit_from_memory(&model_bytes)
            .map_err(|e| InferenceError::Onnx(format!("Failed to load model: {e}")))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| InferenceError::UnsupportedInput("model has no inputs".to_string()))?;
        let input_kind = match &input.input_type {
            ValueType::Tensor { ty, .. } => match ty {
                TensorElementType::Int64 => InputKind::Int64,
                TensorElementType::Int32 => InputKind::Int32,
                TensorElementType::Float32 => InputKind::Float32,
                other => {
                    return Err(InferenceError::UnsupportedInput(format!(
                        "element type {other:?}"
                    )))
                }
            },
            other => {
                return Err(InferenceError::UnsupportedInput(format!(
                    "non-tensor input {other:?}"
                )))
            }
        };
        let input_name = input.name.clone();

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError::Onnx("model has no outputs".to_string()))?;

        debug!(
            input = %input_name,
            output = %output_name,
            ?input_kind,
            "Emotion classifier loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            input_kind,
        })
    }

    fn input_tensor(&self, token_ids: &[i64]) -> Result<SessionInputValue<'static>, InferenceError> {
        let shape = [1usize, token_ids.len()];
        let value = match self.input_kind {
            InputKind::Int64 => Tensor::from_array((shape, token_ids.to_vec().into_boxed_slice()))
                .map(SessionInputValue::from),
            InputKind::Int32 => {
                let data: Vec<i32> = token_ids.iter().map(|&id| id as i32).collect();
                Tensor::from_array((shape, data.into_boxed_slice())).map(SessionInputValue::from)
            }
            InputKind::Float32 => {
                let data: Vec<f32> = token_ids.iter().map(|&id| id as f32).collect();
                Tensor::from_array((shape, data.into_boxed_slice())).map(SessionInputValue::from)
            }
        };
        value.map_err(|e| InferenceError::Onnx(e.to_string()))
    }

    fn run(&self, token_ids: &[i64]) -> Result<Vec<f32>, InferenceError> {
        let input = self.input_tensor(token_ids)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| InferenceError::Onnx(format!("Session lock error: {e}")))?;

        let outputs = session
            .run(vec![(self.input_name.as_str(), input)])
            .map_err(|e| InferenceError::Onnx(e.to_string()))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| InferenceError::Onnx(format!("Output '{}' not found", self.output_name)))?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Onnx(e.to_string()))?;

        debug!(?shape, data_len = data.len(), "Classifier output");

        Ok(data.iter().copied().take(Emotion::ALL.len()).collect())
    }
}

impl SequenceClassifier for OnnxEmotionModel {
    fn predict_proba(&self, token_ids: &[i64]) -> Result<Vec<f32>, ClassifierError> {
        let probs = self.run(token_ids)?;
        if probs.len() < Emotion::ALL.len() {
            return Err(ClassifierError::InvalidOutput(format!(
                "expected {} probabilities, got {}",
                Emotion::ALL.len(),
                probs.len()
            )));
        }
        Ok(probs)
    }
}
