//! Local key fabric: one random key per edge.
//!
//! The randomness source is always passed in. Seeding the generator fixes
//! the assignment, which is what makes simulations reproducible.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::KrpError;
use crate::types::Graph;

/// Width of a local key in bits (1..=64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct KeyWidth(u32);

impl KeyWidth {
    /// Single-bit keys.
    pub const ONE_BIT: KeyWidth = KeyWidth(1);

    /// Create a key width, rejecting 0 and anything above 64.
    pub fn new(bits: u32) -> Result<Self, KrpError> {
        if (1..=64).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(KrpError::InvalidKeyWidth(bits))
        }
    }

    /// Number of bits.
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Mask selecting the low `bits` bits.
    pub fn mask(&self) -> u64 {
        if self.0 >= 64 {
            u64::MAX
        } else {
            (1u64 << self.0) - 1
        }
    }
}

impl Default for KeyWidth {
    fn default() -> Self {
        Self::ONE_BIT
    }
}

impl TryFrom<u32> for KeyWidth {
    type Error = KrpError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<KeyWidth> for u32 {
    fn from(width: KeyWidth) -> Self {
        width.0
    }
}

/// Local keys of one simulation run, in edge-index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalKeyAssignment {
    width: KeyWidth,
    keys: Vec<u64>,
}

impl LocalKeyAssignment {
    /// Key of the edge at `index`.
    pub fn key(&self, index: usize) -> Option<u64> {
        self.keys.get(index).copied()
    }

    /// All keys, indexed like the graph's edges.
    pub fn keys(&self) -> &[u64] {
        &self.keys
    }

    /// Key width used for the draw.
    pub fn width(&self) -> KeyWidth {
        self.width
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the graph had no edges.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// XOR of the keys at the given edge indices.
    pub fn xor_of(&self, edge_indices: &[usize]) -> u64 {
        edge_indices
            .iter()
            .filter_map(|&i| self.key(i))
            .fold(0, |acc, k| acc ^ k)
    }
}

/// Draw one uniformly random bit per edge.
pub fn assign_keys<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> LocalKeyAssignment {
    assign_keys_with_width(graph, KeyWidth::ONE_BIT, rng)
}

/// Draw one uniformly random `width`-bit key per edge, in edge-index order.
pub fn assign_keys_with_width<R: Rng + ?Sized>(
    graph: &Graph,
    width: KeyWidth,
    rng: &mut R,
) -> LocalKeyAssignment {
    let mask = width.mask();
    let keys = (0..graph.num_edges())
        .map(|_| rng.gen::<u64>() & mask)
        .collect();
    LocalKeyAssignment { width, keys }
}
