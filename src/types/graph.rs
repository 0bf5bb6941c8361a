//! Simple undirected graphs with a fixed edge index.

use serde::Serialize;
use std::collections::BTreeSet;

use super::edge::Edge;
use super::node::NodeId;
use crate::canonical::canonical_hash_hex;
use crate::error::KrpError;
use crate::gf2::Gf2Vector;

/// Simple undirected graph on the nodes `0..n_nodes`.
///
/// The edge list is sorted and duplicate-free; the position of an edge in it
/// is the edge's index. Edge subsets (paths, wiretap sets) become bit-vectors
/// over that index for GF(2) algebra. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    n_nodes: usize,
    edges: Vec<Edge>,
    /// Neighbours of each node, ascending.
    #[serde(skip)]
    adjacency: Vec<Vec<NodeId>>,
}

impl Graph {
    /// Build a graph, validating endpoints and rejecting duplicate edges.
    pub fn new(n_nodes: usize, edges: impl IntoIterator<Item = Edge>) -> Result<Self, KrpError> {
        let mut set = BTreeSet::new();
        for edge in edges {
            if edge.hi().index() >= n_nodes {
                return Err(KrpError::NodeOutOfRange { node: edge.hi(), n_nodes });
            }
            if !set.insert(edge) {
                return Err(KrpError::DuplicateEdge(edge));
            }
        }
        Ok(Self::from_sorted(n_nodes, set.into_iter().collect()))
    }

    /// Build a graph from raw `(u, v)` pairs.
    pub fn from_pairs(n_nodes: usize, pairs: &[(u32, u32)]) -> Result<Self, KrpError> {
        let edges = pairs
            .iter()
            .map(|&(u, v)| Edge::new(u, v))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(n_nodes, edges)
    }

    /// Graph with nodes but no edges.
    pub fn empty(n_nodes: usize) -> Self {
        Self::from_sorted(n_nodes, Vec::new())
    }

    /// Build from an edge list that is already sorted, unique and in range.
    pub(crate) fn from_sorted(n_nodes: usize, edges: Vec<Edge>) -> Self {
        debug_assert!(edges.windows(2).all(|w| w[0] < w[1]), "edges must be sorted and unique");

        let mut adjacency = vec![Vec::new(); n_nodes];
        for edge in &edges {
            adjacency[edge.lo().index()].push(edge.hi());
            adjacency[edge.hi().index()].push(edge.lo());
        }
        for neighbours in &mut adjacency {
            neighbours.sort_unstable();
        }

        Self { n_nodes, edges, adjacency }
    }

    /// Number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// All edges in index order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge at a given index.
    pub fn edge(&self, index: usize) -> Option<Edge> {
        self.edges.get(index).copied()
    }

    /// Index of an edge, if the edge belongs to the graph.
    pub fn edge_index(&self, edge: &Edge) -> Option<usize> {
        self.edges.binary_search(edge).ok()
    }

    /// Whether the graph contains an edge.
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edge_index(edge).is_some()
    }

    /// Iterate over all node ids.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.n_nodes as u32).map(NodeId)
    }

    /// Neighbours of a node in ascending order.
    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reject node ids outside `0..n_nodes`.
    pub fn check_node(&self, node: NodeId) -> Result<(), KrpError> {
        if node.index() < self.n_nodes {
            Ok(())
        } else {
            Err(KrpError::NodeOutOfRange { node, n_nodes: self.n_nodes })
        }
    }

    /// Indicator vector over the edge index for a set of edges.
    pub fn indicator<'a>(
        &self,
        edges: impl IntoIterator<Item = &'a Edge>,
    ) -> Result<Gf2Vector, KrpError> {
        let mut vector = Gf2Vector::zeros(self.num_edges());
        for edge in edges {
            let index = self
                .edge_index(edge)
                .ok_or(KrpError::UnknownAdversaryEdge(*edge))?;
            vector.set(index, true);
        }
        Ok(vector)
    }

    /// Relabel nodes: node `v` becomes `permutation[v]`.
    ///
    /// `permutation` must be a permutation of `0..n_nodes`.
    pub fn relabel(&self, permutation: &[NodeId]) -> Result<Self, KrpError> {
        let mut edges = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            let lo = *permutation
                .get(edge.lo().index())
                .ok_or(KrpError::NodeOutOfRange { node: edge.lo(), n_nodes: permutation.len() })?;
            let hi = *permutation
                .get(edge.hi().index())
                .ok_or(KrpError::NodeOutOfRange { node: edge.hi(), n_nodes: permutation.len() })?;
            edges.push(Edge::new(lo, hi)?);
        }
        Self::new(self.n_nodes, edges)
    }

    /// Stable fingerprint of the labelled graph (xxh64 of its canonical JSON).
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }
}
