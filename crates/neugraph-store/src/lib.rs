//! Neugraph Store
//!
//! An in-memory directed graph of layered nodes and weighted links, guarded by
//! referential integrity checks and persisted to a JSON document on every
//! successful mutation.

/// Error module
pub mod error;

/// Graph data model
pub mod model;

/// Integrity checks
pub mod validator;

/// Persistence adapters
pub mod persistence;

/// Graph store
pub mod store;

/// Fixture generation
pub mod generator;

// Re-export key types
pub use error::{GraphError, GraphResult, Violation};
pub use generator::generate_layered_graph;
pub use model::{AddNodeRequest, Graph, Link, Node, DEFAULT_LINK_WEIGHT};
pub use persistence::{
    load_graph, save_graph, GraphPersistence, InMemoryPersistence, JsonFilePersistence,
};
pub use store::GraphStore;
pub use validator::validate;
