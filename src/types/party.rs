//! Protocol participants: user pairs and the wiretap adversary.

use serde::Serialize;
use std::collections::BTreeSet;

use super::edge::Edge;
use super::graph::Graph;
use super::node::NodeId;
use super::path::Path;
use crate::error::KrpError;
use crate::gf2::Gf2Vector;

/// Two users that want to share a relayed key.
///
/// The path and the keys each endpoint derives are filled in by the
/// simulator; they stay `None` when the endpoints are disconnected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPair {
    u1: NodeId,
    u2: NodeId,
    pub(crate) path: Option<Path>,
    pub(crate) k1: Option<u64>,
    pub(crate) k2: Option<u64>,
}

impl UserPair {
    /// Create a user pair. Identical endpoints are rejected.
    pub fn new(u1: impl Into<NodeId>, u2: impl Into<NodeId>) -> Result<Self, KrpError> {
        let (u1, u2) = (u1.into(), u2.into());
        if u1 == u2 {
            return Err(KrpError::DegeneratePair(u1));
        }
        Ok(Self { u1, u2, path: None, k1: None, k2: None })
    }

    /// First endpoint.
    pub fn u1(&self) -> NodeId {
        self.u1
    }

    /// Second endpoint.
    pub fn u2(&self) -> NodeId {
        self.u2
    }

    /// Relay path found by the last simulation.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Key derived by the first endpoint.
    pub fn k1(&self) -> Option<u64> {
        self.k1
    }

    /// Key derived by the second endpoint.
    pub fn k2(&self) -> Option<u64> {
        self.k2
    }

    /// Shared key, present only when both endpoints derived the same value.
    pub fn key(&self) -> Option<u64> {
        match (self.k1, self.k2) {
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.path = None;
        self.k1 = None;
        self.k2 = None;
    }
}

/// Wiretap adversary.
///
/// Observes the local key of every wiretapped edge. Edges are kept in their
/// natural order, which is also the edge-index order of any graph that
/// contains them, so observations line up with the edge index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Adversary {
    wiretapped: BTreeSet<Edge>,
    pub(crate) observed: Vec<u64>,
}

impl Adversary {
    /// Adversary wiretapping the given edges.
    pub fn new(edges: impl IntoIterator<Item = Edge>) -> Self {
        Self { wiretapped: edges.into_iter().collect(), observed: Vec::new() }
    }

    /// Adversary that wiretaps nothing.
    pub fn passive() -> Self {
        Self::default()
    }

    /// Adversary wiretapping every edge of a graph.
    pub fn wiretap_all(graph: &Graph) -> Self {
        Self::new(graph.edges().iter().copied())
    }

    /// Adversary wiretapping the edges whose index bit is set in `mask`.
    ///
    /// Only the first 64 edges are addressable.
    pub fn from_mask(graph: &Graph, mask: u64) -> Self {
        Self::new(
            graph
                .edges()
                .iter()
                .enumerate()
                .filter(|(i, _)| *i < 64 && (mask >> i) & 1 == 1)
                .map(|(_, e)| *e),
        )
    }

    /// Wiretapped edges in edge-index order.
    pub fn wiretapped(&self) -> &BTreeSet<Edge> {
        &self.wiretapped
    }

    /// Keys observed in the last simulation, one per wiretapped edge.
    pub fn observed_keys(&self) -> &[u64] {
        &self.observed
    }

    /// Check that every wiretapped edge exists in the graph.
    pub fn validate(&self, graph: &Graph) -> Result<(), KrpError> {
        match self.wiretapped.iter().find(|e| !graph.contains_edge(e)) {
            Some(edge) => Err(KrpError::UnknownAdversaryEdge(*edge)),
            None => Ok(()),
        }
    }

    /// One unit vector per wiretapped edge over the graph's edge index.
    pub fn wiretap_vectors(&self, graph: &Graph) -> Result<Vec<Gf2Vector>, KrpError> {
        self.wiretapped
            .iter()
            .map(|edge| graph.indicator([edge]))
            .collect()
    }
}
