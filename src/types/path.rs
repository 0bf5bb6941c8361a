//! Relay paths between two nodes.

use serde::Serialize;

use super::edge::Edge;
use super::graph::Graph;
use super::node::NodeId;
use crate::gf2::Gf2Vector;

/// A simple path through a graph.
///
/// Holds both the node sequence (from the first endpoint to the second) and
/// the index of every traversed edge, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    nodes: Vec<NodeId>,
    edge_indices: Vec<usize>,
}

impl Path {
    pub(crate) fn new(nodes: Vec<NodeId>, edge_indices: Vec<usize>) -> Self {
        debug_assert_eq!(nodes.len(), edge_indices.len() + 1);
        Self { nodes, edge_indices }
    }

    /// Nodes visited, endpoints included.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edge indices traversed, in order.
    pub fn edge_indices(&self) -> &[usize] {
        &self.edge_indices
    }

    /// Number of edges on the path.
    pub fn len(&self) -> usize {
        self.edge_indices.len()
    }

    /// Whether the path has no edges.
    pub fn is_empty(&self) -> bool {
        self.edge_indices.is_empty()
    }

    /// Edges traversed, resolved against the graph the path was found in.
    pub fn edges(&self, graph: &Graph) -> Vec<Edge> {
        self.edge_indices
            .iter()
            .filter_map(|&i| graph.edge(i))
            .collect()
    }

    /// Path vector: indicator of the traversed edges over `num_edges` positions.
    pub fn indicator(&self, num_edges: usize) -> Gf2Vector {
        let mut vector = Gf2Vector::zeros(num_edges);
        for &index in &self.edge_indices {
            vector.set(index, true);
        }
        vector
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nodes: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        write!(f, "[{}]", nodes.join(", "))
    }
}
