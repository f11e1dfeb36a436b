//! Churn Predictor Server - scoring API over a pre-trained model
//!
//! Loads the classifier / scaler pair once at startup and serves predictions
//! over HTTP. A missing or corrupt model does not stop the server: `/health`
//! reports it and `/predict` answers 503 until a model is trained and the
//! server restarted.
//!
//! # Usage
//! ```sh
//! MODEL_DIR=models SERVER_PORT=8000 cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `MODEL_DIR` - Directory holding `churn_model.json` and `scaler.json` (default: models)
//! - `SERVER_BIND_ADDRESS` - Listen address (default: 127.0.0.1)
//! - `SERVER_PORT` - Listen port (default: 8000)

use anyhow::Result;
use churn_predictor::application::ml::{ChurnPredictor, SmartCorePredictor};
use churn_predictor::config::Config;
use churn_predictor::infrastructure::observability::Metrics;
use churn_predictor::interfaces::http::{AppState, build_router};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Churn Predictor Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: ModelDir={:?}, Listen={}:{}",
        config.model_dir, config.server.bind_address, config.server.port
    );

    let predictor = SmartCorePredictor::load(&config.artifact_store());
    let status = predictor.status();
    if status.is_available() {
        info!("Model state: {}", status.label());
    } else {
        warn!(
            "Model state: {} ({}). Serving health checks only.",
            status.label(),
            status.detail().unwrap_or_default()
        );
    }

    let metrics = Metrics::new()?;
    let state = AppState::new(Arc::new(predictor), metrics);
    let app = build_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Exiting...");
}
