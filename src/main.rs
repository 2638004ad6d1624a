//! EmotifyLyrics - Entry Point

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emotify_lyrics::{config::AppConfig, predict::ClassifierBundle, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging();

    info!("Starting EmotifyLyrics");

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config from environment: {e}, using defaults");
        AppConfig::default()
    });

    info!(
        model_dir = %config.model.dir.display(),
        seeded = config.predictor.seed.is_some(),
        "Configuration loaded"
    );

    if let Err(e) = std::fs::create_dir_all(&config.model.dir) {
        warn!(error = %e, dir = %config.model.dir.display(), "Could not create model directory");
    }

    // Artifacts are read once; the bundle is immutable from here on
    let model_config = config.model.clone();
    let bundle = tokio::task::spawn_blocking(move || ClassifierBundle::load(&model_config))
        .await
        .context("Classifier loading task failed")?;

    info!(
        model_loaded = bundle.model_loaded(),
        tokenizer = ?bundle.tokenizer_origin(),
        "EmotifyLyrics initialized"
    );

    // Create app state
    let addr = config
        .server
        .socket_addr()
        .context("Invalid server address")?;
    let state = server::AppState::new(config, bundle).context("Failed to build app state")?;

    // Create router
    let app = server::create_router(state);

    // Bind to socket
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(%addr, "Server listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emotify_lyrics=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
