//! Referential integrity checks
//!
//! Pure functions over a [`Graph`] snapshot. Nothing here mutates or touches
//! the disk, so candidate graphs can be checked before the store commits them.

use std::collections::HashSet;

use crate::error::{GraphError, GraphResult, Violation};
use crate::model::Graph;

/// Check node id uniqueness, non-empty ids and link endpoint validity.
///
/// Returns the first violation found; node rules are checked before link rules.
/// Self-loops and repeated `(source, target)` pairs are allowed here.
pub fn validate(graph: &Graph) -> GraphResult<()> {
    let mut ids: HashSet<&str> = HashSet::with_capacity(graph.nodes.len());

    for (index, node) in graph.nodes.iter().enumerate() {
        if node.id.is_empty() {
            return Err(Violation::EmptyNodeId { index }.into());
        }
        if !ids.insert(node.id.as_str()) {
            return Err(Violation::DuplicateNodeId {
                id: node.id.clone(),
            }
            .into());
        }
    }

    for (index, link) in graph.links.iter().enumerate() {
        if link.source.is_empty() || link.target.is_empty() {
            return Err(Violation::EmptyLinkEndpoint { index }.into());
        }
        if !ids.contains(link.source.as_str()) || !ids.contains(link.target.as_str()) {
            return Err(Violation::DanglingLink {
                index,
                source: link.source.clone(),
                target: link.target.clone(),
            }
            .into());
        }
    }

    Ok(())
}

/// Reject an empty identifier field
pub fn require_id(field: &str, value: &str) -> GraphResult<()> {
    if value.is_empty() {
        return Err(GraphError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Reject weights that are not finite and strictly positive
pub fn require_positive_weight(weight: f64) -> GraphResult<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(GraphError::InvalidInput(format!(
            "weight must be greater than 0, got {}",
            weight
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, Node};

    fn abc_graph() -> Graph {
        Graph::new(
            vec![Node::new("A", 1, 1), Node::new("B", 1, 2), Node::new("C", 2, 2)],
            vec![Link::new("A", "B", 5.0), Link::new("A", "C", 3.0)],
        )
    }

    #[test]
    fn test_valid_graph_passes() {
        assert!(validate(&abc_graph()).is_ok());
        assert!(validate(&Graph::default()).is_ok());
    }

    #[test]
    fn test_empty_node_id_rejected() {
        let mut graph = abc_graph();
        graph.nodes.push(Node::new("", 1, 1));
        match validate(&graph) {
            Err(GraphError::InvalidGraph(Violation::EmptyNodeId { index })) => assert_eq!(index, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        let mut graph = abc_graph();
        graph.nodes.push(Node::new("B", 9, 9));
        match validate(&graph) {
            Err(GraphError::InvalidGraph(Violation::DuplicateNodeId { id })) => assert_eq!(id, "B"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_dangling_link_rejected() {
        let mut graph = abc_graph();
        graph.links.push(Link::new("C", "Z", 1.0));
        match validate(&graph) {
            Err(GraphError::InvalidGraph(Violation::DanglingLink { index, source, target })) => {
                assert_eq!(index, 2);
                assert_eq!(source, "C");
                assert_eq!(target, "Z");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_link_endpoint_rejected() {
        let mut graph = abc_graph();
        graph.links.push(Link::new("", "A", 1.0));
        assert!(matches!(
            validate(&graph),
            Err(GraphError::InvalidGraph(Violation::EmptyLinkEndpoint { index: 2 }))
        ));
    }

    #[test]
    fn test_self_loops_and_duplicate_links_tolerated() {
        let mut graph = abc_graph();
        graph.links.push(Link::new("A", "A", 1.0));
        graph.links.push(Link::new("A", "B", 2.0));
        assert!(validate(&graph).is_ok());
    }

    #[test]
    fn test_weight_rules() {
        assert!(require_positive_weight(0.25).is_ok());
        assert!(require_positive_weight(0.0).is_err());
        assert!(require_positive_weight(-1.0).is_err());
        assert!(require_positive_weight(f64::NAN).is_err());
        assert!(require_positive_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("node id", "A").is_ok());
        assert!(matches!(require_id("node id", ""), Err(GraphError::InvalidInput(_))));
    }
}
