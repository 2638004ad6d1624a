//! EmotifyLyrics
//!
//! A small web service that classifies song lyrics as happy, sad, angry or
//! fearful. A trained sequence classifier answers when its artifacts are
//! available; otherwise a keyword scorer does.

pub mod config;
pub mod emotion;
pub mod error;
#[cfg(feature = "inference")]
pub mod inference;
pub mod predict;
pub mod server;
pub mod types;
pub mod validate;

pub use config::AppConfig;
pub use emotion::{Emotion, EmotionInfo};
pub use error::{AppError, Result};
pub use predict::{predict, ClassifierBundle, Prediction, PredictionSource};
pub use validate::{validate_lyrics, ValidationError};
