//! Named relay topologies.
//!
//! Fixed families used for spot checks next to the exhaustive universe.
//! Node `0` is the hub of a star; rings and lines visit nodes in order.

use crate::types::{Edge, Graph, NodeId};

fn build(n_nodes: usize, mut edges: Vec<(u32, u32)>) -> Graph {
    for pair in &mut edges {
        if pair.0 > pair.1 {
            *pair = (pair.1, pair.0);
        }
    }
    edges.sort_unstable();
    edges.dedup();
    let edges = edges
        .into_iter()
        .map(|(a, b)| Edge::from_ordered(NodeId(a), NodeId(b)))
        .collect();
    Graph::from_sorted(n_nodes, edges)
}

/// Complete graph: every pair of nodes is joined.
pub fn complete(n_nodes: usize) -> Graph {
    let n = n_nodes as u32;
    build(n_nodes, (0..n).flat_map(|a| (a + 1..n).map(move |b| (a, b))).collect())
}

/// Ring `0-1-…-(n-1)-0`. With fewer than three nodes this is a line.
pub fn ring(n_nodes: usize) -> Graph {
    if n_nodes < 3 {
        return line(n_nodes);
    }
    let n = n_nodes as u32;
    build(n_nodes, (0..n).map(|i| (i, (i + 1) % n)).collect())
}

/// Star with hub `0` joined to every other node.
pub fn star(n_nodes: usize) -> Graph {
    build(n_nodes, (1..n_nodes as u32).map(|i| (0, i)).collect())
}

/// Line `0-1-…-(n-1)`.
pub fn line(n_nodes: usize) -> Graph {
    build(n_nodes, (1..n_nodes as u32).map(|i| (i - 1, i)).collect())
}
