//! HTTP server setup and routing.

mod extractors;
mod pages;
mod predict;
mod routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::predict::ClassifierBundle;

pub use pages::Pages;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Classifier artifacts, read-only after startup
    pub bundle: Arc<ClassifierBundle>,
    /// Source of confidence jitter; each request forks its own generator
    pub rng: Arc<Mutex<StdRng>>,
    pub pages: Arc<Pages>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    /// Create state around an already loaded classifier bundle.
    pub fn new(config: AppConfig, bundle: ClassifierBundle) -> Result<Self> {
        let rng = match config.predictor.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            config: Arc::new(config),
            bundle: Arc::new(bundle),
            rng: Arc::new(Mutex::new(rng)),
            pages: Arc::new(Pages::new()?),
            started_at: Instant::now(),
        })
    }

    /// Create state with no model and the bootstrap tokenizer
    pub fn unloaded(config: AppConfig) -> Result<Self> {
        let bundle = ClassifierBundle::unloaded(&config.model);
        Self::new(config, bundle)
    }

    /// Derive an independent generator for one request
    pub fn fork_rng(&self) -> Result<StdRng> {
        let mut shared = self
            .rng
            .lock()
            .map_err(|e| AppError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(StdRng::from_rng(&mut *shared))
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.server.static_dir);
    let body_limit = state.config.server.body_limit;

    Router::new()
        // Pages
        .route("/", get(pages::index))
        .route("/deteksi", get(pages::deteksi))
        .route("/tentang", get(pages::tentang))
        .route("/hasil", get(pages::hasil))
        // API
        .route("/predict", post(predict::predict))
        .route("/api/emotions", get(routes::emotions))
        .route("/health", get(routes::health))
        .nest_service("/static", static_files)
        .fallback(pages::not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
