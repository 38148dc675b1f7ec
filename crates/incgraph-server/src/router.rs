//! Axum router setup for the graph server

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::{
    assets::static_handler,
    handlers::{get_graph, health_check},
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Graph document, under the page's own name and the API path
        .route("/graph.json", get(get_graph))
        .route("/api/graph", get(get_graph))
        .route("/api/health", get(health_check))
        // Static file serving
        .route("/", get(static_handler))
        .route("/*path", get(static_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
