//! Graph API handlers
//!
//! Each handler decodes its body, calls one store operation and maps the
//! result onto a status code.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use neugraph_store::{AddNodeRequest, Graph, GraphStore, Link, Node};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::errors::ApiError;

/// Return the whole graph
pub async fn get_graph_handler(State(store): State<Arc<GraphStore>>) -> impl IntoResponse {
    let graph = store.get_graph().await;
    debug!(nodes = graph.nodes.len(), links = graph.links.len(), "Returning graph");
    Json(Graph::clone(&graph))
}

/// Replace the whole graph
pub async fn save_graph_handler(
    State(store): State<Arc<GraphStore>>,
    payload: Result<Json<Graph>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(graph) = payload?;
    info!(nodes = graph.nodes.len(), links = graph.links.len(), "Replacing graph");

    store.replace_graph(graph).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Saved successfully" }))))
}

/// Update group and layer of one node
pub async fn update_node_handler(
    State(store): State<Arc<GraphStore>>,
    payload: Result<Json<Node>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(node) = payload?;
    info!(node_id = %node.id, "Updating node");

    store.update_node(node).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Node updated" }))))
}

/// Add a node together with the link attaching it
pub async fn add_node_handler(
    State(store): State<Arc<GraphStore>>,
    payload: Result<Json<AddNodeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(AddNodeRequest { node, link }) = payload?;
    info!(node_id = %node.id, source = %link.source, "Adding node");

    store.add_node(node, link).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Node added" }))))
}

/// Add a link between two existing nodes
pub async fn add_link_handler(
    State(store): State<Arc<GraphStore>>,
    payload: Result<Json<Link>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(link) = payload?;
    info!(source = %link.source, target = %link.target, "Adding link");

    store.add_link(link).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Link added" }))))
}

/// Update the weight of an existing link
pub async fn update_link_handler(
    State(store): State<Arc<GraphStore>>,
    payload: Result<Json<Link>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(link) = payload?;
    info!(source = %link.source, target = %link.target, weight = link.weight, "Updating link");

    store.update_link(link).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Link updated" }))))
}
