//! Persistence adapters
//!
//! The [`GraphPersistence`] trait is the contract between the store and its
//! backing medium. [`JsonFilePersistence`] is the production adapter; it rewrites
//! the whole document on every save. [`InMemoryPersistence`] is used for
//! development and testing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{GraphError, GraphResult};
use crate::model::Graph;

/// Loads and saves whole graphs
#[async_trait]
pub trait GraphPersistence: Send + Sync {
    /// Read the stored graph
    async fn load(&self) -> GraphResult<Graph>;

    /// Replace the stored graph with `graph`
    async fn save(&self, graph: &Graph) -> GraphResult<()>;

    /// Human readable location, used in logs
    fn describe(&self) -> String;
}

/// Stores the graph as a single indented JSON document
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GraphPersistence for JsonFilePersistence {
    async fn load(&self) -> GraphResult<Graph> {
        load_graph(&self.path).await
    }

    async fn save(&self, graph: &Graph) -> GraphResult<()> {
        save_graph(&self.path, graph).await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read and decode the graph document at `path`
pub async fn load_graph(path: &Path) -> GraphResult<Graph> {
    let bytes = tokio::fs::read(path).await.map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let graph: Graph = serde_json::from_slice(&bytes).map_err(GraphError::Decode)?;
    info!(
        path = %path.display(),
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "Loaded graph"
    );
    Ok(graph)
}

/// Encode `graph` and overwrite the document at `path` in one write
pub async fn save_graph(path: &Path, graph: &Graph) -> GraphResult<()> {
    let bytes = encode_graph(graph)?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "Wrote graph file");
    Ok(())
}

/// Indented JSON with two-space indentation
pub fn encode_graph(graph: &Graph) -> GraphResult<Vec<u8>> {
    serde_json::to_vec_pretty(graph).map_err(GraphError::Encode)
}

/// Keeps the last saved graph in memory
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    stored: Mutex<Graph>,
    saves: AtomicUsize,
    failing_saves: AtomicUsize,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `graph` already stored
    pub fn with_graph(graph: Graph) -> Self {
        Self {
            stored: Mutex::new(graph),
            ..Self::default()
        }
    }

    /// Last saved graph
    pub fn stored(&self) -> Graph {
        self.stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make the next `count` saves fail with an I/O error
    pub fn fail_next_saves(&self, count: usize) {
        self.failing_saves.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl GraphPersistence for InMemoryPersistence {
    async fn load(&self) -> GraphResult<Graph> {
        Ok(self.stored())
    }

    async fn save(&self, graph: &Graph) -> GraphResult<()> {
        let failing = self
            .failing_saves
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(GraphError::Io {
                path: PathBuf::from(self.describe()),
                source: std::io::Error::new(std::io::ErrorKind::Other, "simulated write failure"),
            });
        }

        *self
            .stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = graph.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://graph".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, Node};

    #[tokio::test]
    async fn test_in_memory_failures_are_counted_down() {
        let persistence = InMemoryPersistence::new();
        persistence.fail_next_saves(1);

        let graph = Graph::new(vec![Node::new("A", 1, 1)], vec![]);
        assert!(persistence.save(&graph).await.is_err());
        assert_eq!(persistence.save_count(), 0);

        persistence.save(&graph).await.unwrap();
        assert_eq!(persistence.save_count(), 1);
        assert_eq!(persistence.stored(), graph);
    }

    #[test]
    fn test_encoding_is_indented_with_stable_keys() {
        let graph = Graph::new(vec![Node::new("A", 1, 1)], vec![Link::new("A", "A", 2.5)]);
        let text = String::from_utf8(encode_graph(&graph).unwrap()).unwrap();
        assert!(text.starts_with("{\n  \"nodes\": ["));
        let id_pos = text.find("\"id\"").unwrap();
        let group_pos = text.find("\"group\"").unwrap();
        let layer_pos = text.find("\"layer\"").unwrap();
        assert!(id_pos < group_pos && group_pos < layer_pos);
        assert!(text.find("\"nodes\"").unwrap() < text.find("\"links\"").unwrap());
    }
}
