//! Health check endpoint for the Neugraph Server

use axum::{extract::State, response::IntoResponse, Json};
use neugraph_store::GraphStore;
use serde_json::json;
use std::sync::Arc;

/// Health check handler
///
/// Reports the size of the committed graph. The store is loaded before the
/// server starts listening, so a reachable server always has a graph.
pub async fn health_check(State(store): State<Arc<GraphStore>>) -> impl IntoResponse {
    let graph = store.get_graph().await;
    Json(json!({
        "status": "UP",
        "nodes": graph.nodes.len(),
        "links": graph.links.len(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
