//! JSON handlers for the graph server

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use incgraph_core::GraphDocument;
use serde::Serialize;

use crate::ServerState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub nodes: usize,
    pub edges: usize,
}

/// The graph document, as written to `graph.json`.
pub async fn get_graph(State(state): State<Arc<ServerState>>) -> Json<GraphDocument> {
    Json(state.document.clone())
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        nodes: state.document.nodes.len(),
        edges: state.document.edges.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use incgraph_core::{GraphOptions, IncludeGraph};
    use std::path::{Path, PathBuf};

    fn state() -> Arc<ServerState> {
        let mut graph = IncludeGraph::new(GraphOptions {
            seed: Some(5),
            ..GraphOptions::default()
        });
        graph.register(Path::new("/p/a.cpp"), vec![PathBuf::from("/p/b.h")]);
        Arc::new(ServerState::new(graph.to_document()))
    }

    #[tokio::test]
    async fn test_get_graph_returns_document() {
        let state = state();
        let Json(document) = get_graph(State(Arc::clone(&state))).await;
        assert_eq!(document, state.document);
        assert_eq!(document.edges.len(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check(State(state())).await.into_response();
        assert!(response.status().is_success());
    }
}
