//! Node identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a relay node.
///
/// Nodes of a graph with `n` nodes are the contiguous ids `0..n`.
/// Ordering is numeric, which fixes neighbour order during path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a node id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Node id as a slice index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
