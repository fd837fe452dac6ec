//! Graph data model
//!
//! Plain value types matching the JSON wire format. Field order here is the
//! key order of the persisted document.

use serde::{Deserialize, Serialize};

/// Weight given to a link created without an explicit weight
pub const DEFAULT_LINK_WEIGHT: f64 = 1.0;

/// An identified entity in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Caller-assigned primary key
    pub id: String,

    /// Classification tag
    #[serde(default)]
    pub group: i64,

    /// Presentation rank
    #[serde(default)]
    pub layer: i64,

    /// Legacy field written by the fixture generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Legacy activation tag written by the fixture generator
    #[serde(default, rename = "activFn", skip_serializing_if = "Option::is_none")]
    pub activ_fn: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, group: i64, layer: i64) -> Self {
        Self {
            id: id.into(),
            group,
            layer,
            value: None,
            activ_fn: None,
        }
    }
}

/// A directed, weighted connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub weight: f64,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// Whether this link connects `source` to `target` in that direction
    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

/// All current nodes and links; the unit of persistence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// First link from `source` to `target`
    pub fn find_link(&self, source: &str, target: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.connects(source, target))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Body of an add-node request: the new node and the link that attaches it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddNodeRequest {
    pub node: Node,
    pub link: Link,
}
