//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", post(start_timer_handler))
        .route("/timer/preset/:index", post(preset_handler))
        .route("/timer/cancel", post(cancel_handler))
        .route("/timer/presets", get(presets_handler))
        .route("/loop", post(loop_handler))
        .route("/status", get(status_handler))
        .route("/display/stream", get(display_stream_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
