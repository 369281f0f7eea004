use crate::{
    config::Config,
    logic::{detect, health, highlight},
};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Builds the HTTP surface. The Spanish paths are aliases of the English ones.
pub fn router(config: Config) -> Router {
    let body_limit = config.server.max_upload_bytes;
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/health", get(health::health))
        .route("/health-camera", get(health::health_camera))
        .route("/detect-color", post(detect::detect_color))
        .route("/detectar-color", post(detect::detect_color))
        .route("/highlight", post(highlight::highlight))
        .route("/procesar-imagen", post(highlight::highlight))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<()> {
    let listen_addr = config.server.listen_addr.clone();
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("bind {listen_addr} failed"))?;

    log::info!("blindspot listening on http://{listen_addr}");
    axum::serve(listener, router(config))
        .await
        .with_context(|| "server run failed")?;

    Ok(())
}
