//! Isomorphism-free enumeration of simple undirected graphs.
//!
//! Every labelled graph on `n` nodes is a subset of the `m = n(n-1)/2`
//! possible edges, so it is encoded as an `m`-bit mask over the possible-edge
//! positions `(0,1), (0,2), …, (0,n-1), (1,2), …`. The canonical form of a
//! graph is the smallest mask reachable by relabelling its nodes under any of
//! the `n!` permutations. Two graphs are isomorphic iff their canonical forms
//! are equal.
//!
//! ## Cost
//!
//! Enumeration is `O(2^m · n!)`, hence the hard ceiling
//! [`MAX_ENUMERATION_NODES`].

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::KrpError;
use crate::types::{Edge, Graph, NodeId};

/// Largest node count accepted by the enumerator (2^15 candidates × 720 permutations).
pub const MAX_ENUMERATION_NODES: usize = 6;

/// Canonical form of a graph: the minimal possible-edge mask over all relabellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalForm(u64);

impl CanonicalForm {
    /// Raw mask; bit `i` is the `i`-th possible edge.
    pub fn mask(&self) -> u64 {
        self.0
    }
}

/// Position of the node pair `(a, b)`, `a < b`, in the possible-edge order.
fn pair_position(n: usize, a: usize, b: usize) -> usize {
    debug_assert!(a < b && b < n);
    a * n - a * (a + 1) / 2 + (b - a - 1)
}

/// All `n!` permutations of `0..n` (Heap's algorithm). Returns the identity
/// alone for `n <= 1`.
fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut current: Vec<usize> = (0..n).collect();
    let mut out = vec![current.clone()];
    let mut counters = vec![0usize; n];
    let mut i = 1;
    while i < n {
        if counters[i] < i {
            let j = if i % 2 == 0 { 0 } else { counters[i] };
            current.swap(j, i);
            out.push(current.clone());
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
    out
}

/// Possible-edge relabelling tables for one node count.
///
/// `maps[p][i]` is the position that possible edge `i` moves to under
/// permutation `p`.
struct RelabelTable {
    n_nodes: usize,
    maps: Vec<Vec<usize>>,
}

impl RelabelTable {
    fn new(n_nodes: usize) -> Result<Self, KrpError> {
        check_node_count(n_nodes)?;
        let pairs = possible_pairs(n_nodes);
        let maps = permutations(n_nodes)
            .into_iter()
            .map(|perm| {
                pairs
                    .iter()
                    .map(|&(a, b)| {
                        let (x, y) = (perm[a], perm[b]);
                        pair_position(n_nodes, x.min(y), x.max(y))
                    })
                    .collect()
            })
            .collect();
        Ok(Self { n_nodes, maps })
    }

    fn canonicalize(&self, mask: u64) -> CanonicalForm {
        let best = self
            .maps
            .iter()
            .map(|map| relabel_mask(mask, map))
            .min()
            .unwrap_or(mask);
        CanonicalForm(best)
    }
}

fn relabel_mask(mask: u64, map: &[usize]) -> u64 {
    let mut out = 0u64;
    let mut rest = mask;
    while rest != 0 {
        let bit = rest.trailing_zeros() as usize;
        out |= 1u64 << map[bit];
        rest &= rest - 1;
    }
    out
}

fn check_node_count(n_nodes: usize) -> Result<(), KrpError> {
    if n_nodes > MAX_ENUMERATION_NODES {
        return Err(KrpError::InvalidNodeCount {
            requested: n_nodes,
            max: MAX_ENUMERATION_NODES,
        });
    }
    Ok(())
}

/// Node pairs of the complete graph in possible-edge order.
fn possible_pairs(n_nodes: usize) -> Vec<(usize, usize)> {
    (0..n_nodes)
        .flat_map(|a| (a + 1..n_nodes).map(move |b| (a, b)))
        .collect()
}

fn mask_of(graph: &Graph) -> u64 {
    let n = graph.n_nodes();
    graph
        .edges()
        .iter()
        .fold(0u64, |mask, e| mask | 1u64 << pair_position(n, e.lo().index(), e.hi().index()))
}

fn graph_from_mask(n_nodes: usize, mask: u64, pairs: &[(usize, usize)]) -> Graph {
    // Possible-edge order is lexicographic, so ascending bits give sorted edges.
    let edges = pairs
        .iter()
        .enumerate()
        .filter(|(i, _)| (mask >> i) & 1 == 1)
        .map(|(_, &(a, b))| Edge::from_ordered(NodeId(a as u32), NodeId(b as u32)))
        .collect();
    Graph::from_sorted(n_nodes, edges)
}

/// Canonical form of a graph, for isomorphism testing.
pub fn canonical_form(graph: &Graph) -> Result<CanonicalForm, KrpError> {
    let table = RelabelTable::new(graph.n_nodes())?;
    Ok(table.canonicalize(mask_of(graph)))
}

/// Whether two graphs are isomorphic.
pub fn are_isomorphic(a: &Graph, b: &Graph) -> Result<bool, KrpError> {
    if a.n_nodes() != b.n_nodes() || a.num_edges() != b.num_edges() {
        return Ok(false);
    }
    let table = RelabelTable::new(a.n_nodes())?;
    Ok(table.canonicalize(mask_of(a)) == table.canonicalize(mask_of(b)))
}

/// Enumerate one representative per isomorphism class of simple undirected
/// graphs on `n_nodes` nodes.
///
/// Candidates are generated with the first possible edge as the most
/// significant bit (the empty graph first, the complete graph last); each
/// class is represented by the first candidate generated in it, and classes
/// are emitted in that order.
///
/// `n_nodes` of 0 or 1 yields the single edgeless graph. Counts are
/// 1, 1, 2, 4, 11, 34, 156 for `n_nodes` = 0..=6.
pub fn enumerate_all_graphs(n_nodes: usize) -> Result<Vec<Graph>, KrpError> {
    let table = RelabelTable::new(n_nodes)?;
    let pairs = possible_pairs(n_nodes);
    let m = pairs.len();

    let mut seen: HashSet<CanonicalForm> = HashSet::new();
    let mut graphs = Vec::new();

    for k in 0..(1u64 << m) {
        // Reverse the bit order: bit m-1-i of k selects possible edge i.
        let mask = (0..m)
            .filter(|&i| (k >> (m - 1 - i)) & 1 == 1)
            .fold(0u64, |acc, i| acc | 1u64 << i);

        if seen.insert(table.canonicalize(mask)) {
            let graph = graph_from_mask(table.n_nodes, mask, &pairs);
            debug!(index = graphs.len(), edges = graph.num_edges(), "new isomorphism class");
            graphs.push(graph);
        }
    }

    info!(n_nodes, candidates = 1u64 << m, classes = graphs.len(), "graph enumeration complete");
    Ok(graphs)
}
