//! The graph store
//!
//! [`GraphStore`] owns the live graph. Mutations are serialized through a single
//! mutation lock: each one reads the current snapshot, checks and validates a
//! candidate, commits it, and persists it before the lock is released. Readers
//! receive the committed snapshot and never wait on disk writes.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::{GraphError, GraphResult};
use crate::model::{Graph, Link, Node, DEFAULT_LINK_WEIGHT};
use crate::persistence::GraphPersistence;
use crate::validator::{require_id, require_positive_weight, validate};

/// Validated, persisted graph shared by all request handlers
pub struct GraphStore {
    /// Last committed graph
    live: RwLock<Arc<Graph>>,

    /// Held for the whole read-validate-commit-persist sequence
    mutation: Mutex<()>,

    /// Backing medium
    persistence: Arc<dyn GraphPersistence>,
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("persistence", &self.persistence.describe())
            .finish()
    }
}

impl GraphStore {
    /// Load the graph from `persistence` and validate it.
    ///
    /// A graph that cannot be read, decoded or validated is an error; no
    /// default graph is substituted.
    pub async fn open(persistence: Arc<dyn GraphPersistence>) -> GraphResult<Self> {
        let graph = persistence.load().await?;
        if let Err(err) = validate(&graph) {
            error!(location = %persistence.describe(), "Stored graph is invalid: {}", err);
            return Err(err);
        }

        info!(
            location = %persistence.describe(),
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "Opened graph store"
        );
        Ok(Self::from_parts(graph, persistence))
    }

    /// Build a store around an existing graph without loading or saving
    pub fn with_graph(graph: Graph, persistence: Arc<dyn GraphPersistence>) -> GraphResult<Self> {
        validate(&graph)?;
        Ok(Self::from_parts(graph, persistence))
    }

    fn from_parts(graph: Graph, persistence: Arc<dyn GraphPersistence>) -> Self {
        Self {
            live: RwLock::new(Arc::new(graph)),
            mutation: Mutex::new(()),
            persistence,
        }
    }

    /// Current committed graph
    pub async fn get_graph(&self) -> Arc<Graph> {
        self.live.read().await.clone()
    }

    pub async fn node_count(&self) -> usize {
        self.live.read().await.nodes.len()
    }

    pub async fn link_count(&self) -> usize {
        self.live.read().await.links.len()
    }

    /// Replace the whole graph after validating it.
    ///
    /// Only the integrity rules are checked; self-loops and repeated links in
    /// `candidate` are kept as given.
    pub async fn replace_graph(&self, candidate: Graph) -> GraphResult<()> {
        self.mutate("replace_graph", move |graph| {
            *graph = candidate;
            Ok(())
        })
        .await
    }

    /// Append `node` together with the link that attaches it to the graph.
    ///
    /// `origin` must run from an existing node to `node`.
    pub async fn add_node(&self, node: Node, origin: Link) -> GraphResult<()> {
        self.mutate("add_node", move |graph| {
            require_id("node id", &node.id)?;
            if graph.contains_node(&node.id) {
                return Err(GraphError::Conflict(format!(
                    "node '{}' already exists",
                    node.id
                )));
            }

            require_id("link source", &origin.source)?;
            require_id("link target", &origin.target)?;
            if !graph.contains_node(&origin.source) {
                return Err(GraphError::InvalidInput(format!(
                    "source node '{}' does not exist",
                    origin.source
                )));
            }
            if origin.target != node.id {
                return Err(GraphError::InvalidInput(format!(
                    "link target '{}' must be the new node '{}'",
                    origin.target, node.id
                )));
            }

            let origin = with_default_weight(origin)?;
            graph.nodes.push(node);
            graph.links.push(origin);
            Ok(())
        })
        .await
    }

    /// Overwrite `group` and `layer` of the node with `update.id`
    pub async fn update_node(&self, update: Node) -> GraphResult<()> {
        self.mutate("update_node", move |graph| {
            require_id("node id", &update.id)?;
            let node = graph
                .nodes
                .iter_mut()
                .find(|n| n.id == update.id)
                .ok_or_else(|| GraphError::NotFound(format!("Node '{}'", update.id)))?;

            node.group = update.group;
            node.layer = update.layer;
            Ok(())
        })
        .await
    }

    /// Append a link between two existing, distinct nodes
    pub async fn add_link(&self, link: Link) -> GraphResult<()> {
        self.mutate("add_link", move |graph| {
            require_id("link source", &link.source)?;
            require_id("link target", &link.target)?;
            if link.source == link.target {
                return Err(GraphError::InvalidInput(format!(
                    "link from '{}' to itself is not allowed",
                    link.source
                )));
            }
            for endpoint in [&link.source, &link.target] {
                if !graph.contains_node(endpoint) {
                    return Err(GraphError::InvalidInput(format!(
                        "node '{}' does not exist",
                        endpoint
                    )));
                }
            }
            if graph.find_link(&link.source, &link.target).is_some() {
                return Err(GraphError::Conflict(format!(
                    "link {} -> {} already exists",
                    link.source, link.target
                )));
            }

            graph.links.push(with_default_weight(link)?);
            Ok(())
        })
        .await
    }

    /// Overwrite the weight of the first link from `update.source` to `update.target`
    pub async fn update_link(&self, update: Link) -> GraphResult<()> {
        self.mutate("update_link", move |graph| {
            require_id("link source", &update.source)?;
            require_id("link target", &update.target)?;
            require_positive_weight(update.weight)?;

            let link = graph
                .links
                .iter_mut()
                .find(|l| l.connects(&update.source, &update.target))
                .ok_or_else(|| {
                    GraphError::NotFound(format!("Link {} -> {}", update.source, update.target))
                })?;

            link.weight = update.weight;
            Ok(())
        })
        .await
    }

    /// Run one mutation inside the mutation section.
    ///
    /// `apply` edits a private copy of the current graph. The copy is validated,
    /// committed, then persisted. A persistence failure is returned but the
    /// commit stands.
    async fn mutate<F>(&self, operation: &'static str, apply: F) -> GraphResult<()>
    where
        F: FnOnce(&mut Graph) -> GraphResult<()>,
    {
        let _section = self.mutation.lock().await;

        let mut candidate = Graph::clone(&*self.get_graph().await);
        if let Err(err) = apply(&mut candidate).and_then(|_| validate(&candidate)) {
            debug!(operation, "Rejected mutation: {}", err);
            return Err(err);
        }

        let committed = Arc::new(candidate);
        *self.live.write().await = committed.clone();

        if let Err(err) = self.persistence.save(&committed).await {
            warn!(
                operation,
                location = %self.persistence.describe(),
                "Committed in memory but failed to persist: {}", err
            );
            return Err(err);
        }

        info!(
            operation,
            nodes = committed.nodes.len(),
            links = committed.links.len(),
            "Committed mutation"
        );
        Ok(())
    }
}

/// Zero means "not supplied" and becomes the default weight
fn with_default_weight(mut link: Link) -> GraphResult<Link> {
    if link.weight == 0.0 {
        link.weight = DEFAULT_LINK_WEIGHT;
    }
    require_positive_weight(link.weight)?;
    Ok(link)
}
