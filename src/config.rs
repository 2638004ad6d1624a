use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `EMOTIFY_` prefix.
/// For example: `EMOTIFY_SERVER__PORT=5000`, `EMOTIFY_PREDICTOR__SEED=7`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Classifier artifact configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Prediction policy configuration
    #[serde(default)]
    pub predictor: PredictorConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Directory holding the model and tokenizer artifacts
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,

    /// Model weights file name (ONNX export of the trained network)
    #[serde(default = "default_model_file")]
    pub model_file: String,

    /// Tokenizer vocabulary file name
    #[serde(default = "default_tokenizer_file")]
    pub tokenizer_file: String,

    /// Fixed input sequence length of the network
    #[serde(default = "default_max_len")]
    pub max_len: usize,

    /// Vocabulary cap; ids at or above it are mapped to the OOV token
    #[serde(default = "default_num_words")]
    pub num_words: usize,

    /// Intra-op threads for the inference session
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: default_model_dir(),
            model_file: default_model_file(),
            tokenizer_file: default_tokenizer_file(),
            max_len: default_max_len(),
            num_words: default_num_words(),
            intra_threads: default_intra_threads(),
        }
    }
}

impl ModelConfig {
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model_file)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.dir.join(&self.tokenizer_file)
    }
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("Model")
}

fn default_model_file() -> String {
    "model_emotion_detection.onnx".to_string()
}

fn default_tokenizer_file() -> String {
    "tokenizer.json".to_string()
}

fn default_max_len() -> usize {
    100
}

fn default_num_words() -> usize {
    10_000
}

fn default_intra_threads() -> usize {
    1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictorConfig {
    /// Seed for the confidence jitter RNG. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            body_limit: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_body_limit() -> usize {
    16 * 1024 * 1024
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `EMOTIFY_` and use
    /// double underscores for nested values:
    /// - `EMOTIFY_MODEL__DIR` -> model.dir
    /// - `EMOTIFY_PREDICTOR__SEED` -> predictor.seed
    /// - `EMOTIFY_SERVER__PORT` -> server.port
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(environment())
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder().add_source(env).build()?;

        config.try_deserialize()
    }
}

/// `EMOTIFY_` prefix, `__` between nested keys
fn environment() -> Environment {
    Environment::with_prefix("EMOTIFY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
