//! Error types for the graph store
//!
//! Every store operation reports failure through [`GraphError`]. Validation
//! variants are produced before any state changes; persistence variants may be
//! produced after an in-memory commit.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The specific integrity rule a candidate graph broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A node at `index` has an empty id
    EmptyNodeId { index: usize },

    /// Two or more nodes share `id`
    DuplicateNodeId { id: String },

    /// A link at `index` has an empty source or target
    EmptyLinkEndpoint { index: usize },

    /// A link at `index` names a node that is not in the graph
    DanglingLink {
        index: usize,
        source: String,
        target: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyNodeId { index } => {
                write!(f, "node at position {} has an empty id", index)
            }
            Violation::DuplicateNodeId { id } => write!(f, "duplicate node id '{}'", id),
            Violation::EmptyLinkEndpoint { index } => {
                write!(f, "link at position {} has an empty endpoint", index)
            }
            Violation::DanglingLink {
                index,
                source,
                target,
            } => write!(
                f,
                "invalid link at position {}: {} -> {} references an unknown node",
                index, source, target
            ),
        }
    }
}

/// Graph store error types
#[derive(Error, Debug)]
pub enum GraphError {
    /// A required field is empty or a value is out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A candidate graph breaks an integrity rule
    #[error("Invalid graph: {0}")]
    InvalidGraph(Violation),

    /// The update target does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate node id or duplicate link
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Reading or writing the backing file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file did not contain a valid graph document
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The graph could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type for graph store operations
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Errors caused by the request rather than by the store
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GraphError::InvalidInput(_)
                | GraphError::InvalidGraph(_)
                | GraphError::NotFound(_)
                | GraphError::Conflict(_)
        )
    }

    /// Errors raised by the persistence adapter
    pub fn is_persistence_error(&self) -> bool {
        matches!(
            self,
            GraphError::Io { .. } | GraphError::Decode(_) | GraphError::Encode(_)
        )
    }
}

impl From<Violation> for GraphError {
    fn from(violation: Violation) -> Self {
        GraphError::InvalidGraph(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages_name_the_offender() {
        let err = GraphError::from(Violation::DanglingLink {
            index: 2,
            source: "A".to_string(),
            target: "Z".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.contains("A -> Z"), "unexpected message: {}", msg);
        assert!(err.is_client_error());
        assert!(!err.is_persistence_error());
    }

    #[test]
    fn test_io_error_is_persistence_error() {
        let err = GraphError::Io {
            path: PathBuf::from("/tmp/graph.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.is_persistence_error());
        assert!(err.to_string().contains("/tmp/graph.json"));
    }
}
