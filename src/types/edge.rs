//! Undirected edges of a relay network.

use serde::Serialize;
use std::fmt;

use super::node::NodeId;
use crate::error::KrpError;

/// Undirected edge between two distinct nodes.
///
/// Stored normalised as `(lo, hi)` with `lo < hi`, so `Edge::new(2, 1)` and
/// `Edge::new(1, 2)` are the same edge. The derived `Ord` is lexicographic on
/// `(lo, hi)`; a graph's edge index is exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    lo: NodeId,
    hi: NodeId,
}

impl Edge {
    /// Create an edge, rejecting self-loops.
    pub fn new(a: impl Into<NodeId>, b: impl Into<NodeId>) -> Result<Self, KrpError> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Ok(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => Err(KrpError::SelfLoop(a)),
        }
    }

    /// Build from endpoints already known to satisfy `lo < hi`.
    pub(crate) fn from_ordered(lo: NodeId, hi: NodeId) -> Self {
        debug_assert!(lo < hi, "edge endpoints must be ordered");
        Self { lo, hi }
    }

    /// Smaller endpoint.
    pub fn lo(&self) -> NodeId {
        self.lo
    }

    /// Larger endpoint.
    pub fn hi(&self) -> NodeId {
        self.hi
    }

    /// Whether `node` is an endpoint of this edge.
    pub fn touches(&self, node: NodeId) -> bool {
        self.lo == node || self.hi == node
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}
