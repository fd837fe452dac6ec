//! Layered fixture graphs
//!
//! Builds fully connected layer-to-layer graphs, used to seed the backing file
//! and as test fixtures.

use rand::Rng;

use crate::model::{Graph, Link, Node};

const MIN_WEIGHT: f64 = 0.1;
const MAX_WEIGHT: f64 = 0.5;
const ACTIVATION: &str = "relu";

/// Generate a graph with `layer_node_counts[i]` nodes in layer `i + 1`.
///
/// Node ids are `L{layer}-N{index}`, both 1-based. Every node of a layer links
/// to every node of the next layer with a random weight in `[0.1, 0.5)`
/// rounded to two decimals.
pub fn generate_layered_graph<R: Rng>(layer_node_counts: &[usize], rng: &mut R) -> Graph {
    let mut nodes = Vec::with_capacity(layer_node_counts.iter().sum());
    let mut layers: Vec<Vec<String>> = Vec::with_capacity(layer_node_counts.len());

    for (layer_index, &count) in layer_node_counts.iter().enumerate() {
        let layer = layer_index as i64 + 1;
        let mut ids = Vec::with_capacity(count);

        for i in 1..=count {
            let id = format!("L{}-N{}", layer, i);
            nodes.push(Node {
                id: id.clone(),
                group: layer,
                layer,
                value: Some(0.0),
                activ_fn: Some(ACTIVATION.to_string()),
            });
            ids.push(id);
        }
        layers.push(ids);
    }

    let mut links = Vec::new();
    for pair in layers.windows(2) {
        for source in &pair[0] {
            for target in &pair[1] {
                let weight = round2(rng.gen_range(MIN_WEIGHT..MAX_WEIGHT));
                links.push(Link::new(source.clone(), target.clone(), weight));
            }
        }
    }

    Graph::new(nodes, links)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_layer_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate_layered_graph(&[3, 4, 2], &mut rng);

        assert_eq!(graph.nodes.len(), 9);
        assert_eq!(graph.links.len(), 3 * 4 + 4 * 2);
        assert_eq!(graph.nodes[0].id, "L1-N1");
        assert_eq!(graph.nodes[8].id, "L3-N2");
        assert_eq!(graph.nodes[3].layer, 2);
        assert_eq!(graph.nodes[3].group, 2);
        assert!(validate(&graph).is_ok());
    }

    #[test]
    fn test_weights_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = generate_layered_graph(&[5, 5], &mut rng);
        for link in &graph.links {
            assert!(link.weight >= 0.1 && link.weight <= 0.5, "weight {}", link.weight);
            assert_eq!(round2(link.weight), link.weight);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_layered_graph(&[], &mut rng).is_empty());

        let single = generate_layered_graph(&[2], &mut rng);
        assert_eq!(single.nodes.len(), 2);
        assert!(single.links.is_empty());
    }
}
