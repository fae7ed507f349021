//! AI Voice Detection API Server
//!
//! HTTP boundary over the acoustic pipeline. Handlers decode request
//! audio, extract features, classify, and fold the result into the
//! documented response payload; pipeline failures map onto client-input
//! or server-fault responses in [`error`].

pub mod error;
mod routes;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use voice_classifier::TableSet;

pub use error::ApiError;

/// Application state shared across handlers.
///
/// Read-only after startup: handlers share it through a plain `Arc` with
/// no locking, since the reference tables are never mutated.
pub struct AppState {
    /// Classifier reference tables, loaded once at process start
    pub tables: TableSet,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// State with the built-in reference tables
    pub fn new() -> Self {
        Self::with_tables(TableSet::builtin())
    }

    /// State with substituted reference tables (test hook)
    pub fn with_tables(tables: TableSet) -> Self {
        Self {
            tables,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::pages::root))
        .route("/app", get(routes::pages::app_page))
        .route("/manifest.json", get(routes::pages::manifest))
        .route("/sw.js", get(routes::pages::service_worker))
        .route("/health", get(health_handler))
        .route("/detect", post(routes::detect::detect))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "active".to_string(),
        message: "AI Voice Detection System is running".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(addr: &str) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new());
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
