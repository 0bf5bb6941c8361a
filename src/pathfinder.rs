//! Shortest relay paths by breadth-first search.
//!
//! Neighbours are expanded in ascending node order and the first discovery
//! of a node fixes its parent. Among several shortest paths this always
//! returns the same one: the path whose node sequence, read backwards from
//! the target, follows the earliest-discovered parents. Secrecy verdicts can
//! depend on which shortest path is used, so this rule is part of the
//! contract.

use std::collections::VecDeque;

use crate::error::KrpError;
use crate::types::{Edge, Graph, NodeId, Path};

/// Find a shortest path from `u1` to `u2`.
///
/// Returns `Ok(None)` when the nodes lie in different components.
pub fn find_path(graph: &Graph, u1: NodeId, u2: NodeId) -> Result<Option<Path>, KrpError> {
    graph.check_node(u1)?;
    graph.check_node(u2)?;
    if u1 == u2 {
        return Err(KrpError::DegeneratePair(u1));
    }

    let mut parent: Vec<Option<NodeId>> = vec![None; graph.n_nodes()];
    let mut visited = vec![false; graph.n_nodes()];
    let mut queue = VecDeque::new();

    visited[u1.index()] = true;
    queue.push_back(u1);

    while let Some(node) = queue.pop_front() {
        if node == u2 {
            break;
        }
        for &next in graph.neighbours(node) {
            if !visited[next.index()] {
                visited[next.index()] = true;
                parent[next.index()] = Some(node);
                queue.push_back(next);
            }
        }
    }

    if !visited[u2.index()] {
        return Ok(None);
    }

    let mut nodes = vec![u2];
    let mut cursor = u2;
    while let Some(prev) = parent[cursor.index()] {
        nodes.push(prev);
        cursor = prev;
    }
    nodes.reverse();

    // Consecutive BFS nodes are always adjacent.
    let edge_indices: Vec<usize> = nodes
        .windows(2)
        .filter_map(|w| Edge::new(w[0], w[1]).ok())
        .filter_map(|edge| graph.edge_index(&edge))
        .collect();
    debug_assert_eq!(
        edge_indices.len() + 1,
        nodes.len(),
        "BFS path has a hop that is not a graph edge"
    );

    Ok(Some(Path::new(nodes, edge_indices)))
}

/// Whether `u1` and `u2` lie in the same connected component.
pub fn connected(graph: &Graph, u1: NodeId, u2: NodeId) -> Result<bool, KrpError> {
    Ok(find_path(graph, u1, u2)?.is_some())
}
