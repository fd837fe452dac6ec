//! API module for the Neugraph Server
//!
//! This module contains the API routes and handlers.

use axum::{
    routing::{get, post, put},
    Router,
};
use neugraph_store::GraphStore;
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod errors;
pub mod graph;
pub mod health;

pub use errors::ApiError;

/// Build the router for API endpoints.
///
/// When `static_dir` is set, requests that match no route are served from it.
pub fn build_router(store: Arc<GraphStore>, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        // Graph reads and whole-graph replace
        .route("/api/getGraph", get(graph::get_graph_handler))
        .route("/api/save", post(graph::save_graph_handler))

        // Node mutations
        .route("/api/node", put(graph::update_node_handler))
        .route("/api/node/add", post(graph::add_node_handler))

        // Link mutations
        .route(
            "/api/link",
            post(graph::add_link_handler).put(graph::update_link_handler),
        )

        // Health check
        .route("/health", get(health::health_check))
        .with_state(store);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}
