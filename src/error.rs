//! Error type shared by every fallible operation in the verifier.
//!
//! All variants are input-validation failures. They are raised at the call
//! that received the bad input and each one names the offending value.

use crate::types::{Edge, NodeId};

/// Invalid input handed to the enumerator, the path finder, the key fabric
/// or the simulator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KrpError {
    /// Node count outside the enumerable range.
    #[error("Invalid node count {requested}: enumeration supports at most {max} nodes")]
    InvalidNodeCount {
        /// Requested node count.
        requested: usize,
        /// Largest accepted node count.
        max: usize,
    },
    /// User pair whose endpoints coincide.
    #[error("Degenerate user pair: both endpoints are node {0}")]
    DegeneratePair(NodeId),
    /// Node id that does not exist in the graph.
    #[error("Node {node} out of range for graph with {n_nodes} nodes")]
    NodeOutOfRange {
        /// Offending node.
        node: NodeId,
        /// Node count of the graph.
        n_nodes: usize,
    },
    /// Wiretapped edge that is not part of the graph.
    #[error("Adversary edge {0} is not an edge of the graph")]
    UnknownAdversaryEdge(Edge),
    /// Edge from a node to itself.
    #[error("Self-loop at node {0}")]
    SelfLoop(NodeId),
    /// Edge listed twice when building a graph.
    #[error("Duplicate edge {0}")]
    DuplicateEdge(Edge),
    /// Key width outside 1..=64 bits.
    #[error("Invalid key width {0}: must be between 1 and 64 bits")]
    InvalidKeyWidth(u32),
}
