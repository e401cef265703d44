//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Report listing and report view routes
//! - Health check
//! - Error responses built from `AppError`

pub mod routes;

use std::sync::Arc;

use axum::Router;
use tally_shared::config::ReportsConfig;
use tally_source::ReportSource;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where report payloads are fetched from.
    pub source: Arc<dyn ReportSource>,
    /// Report view defaults.
    pub reports: ReportsConfig,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
