//! HTTP bridge between content scripts and the background process.

pub mod registry;
pub mod routes;

use anyhow::{Context, Result};
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::background::Background;

pub use registry::TabRegistry;

/// Shared by every handler. The mutex keeps handlers from running
/// against the background state at the same time.
#[derive(Clone)]
pub struct BridgeState {
    pub background: Arc<Mutex<Background>>,
    pub tabs: Arc<TabRegistry>,
}

impl BridgeState {
    pub fn new(background: Background, tabs: Arc<TabRegistry>) -> Self {
        Self {
            background: Arc::new(Mutex::new(background)),
            tabs,
        }
    }
}

pub fn router(state: BridgeState) -> Router {
    Router::new()
        .route("/message", post(routes::post_message))
        .route("/paste", post(routes::post_paste))
        .route("/tabs", put(routes::put_tab))
        .route("/tabs/{id}", delete(routes::delete_tab))
        .route("/tabs/{id}/messages", get(routes::get_messages))
        .route("/options/{key}", put(routes::put_option))
        .route("/history", get(routes::get_history))
        .route("/windows/{id}/removed", post(routes::post_window_removed))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the bridge on localhost until Ctrl-C, then persist the history.
pub async fn serve(state: BridgeState, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("Failed to bind to port {port}"))?;

    info!(port, "Bridge listening");

    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Bridge server failed")?;

    info!("Bridge shutting down");
    state.background.lock().await.on_window_removed()?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
