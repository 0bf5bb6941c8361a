//! Sweep configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::canonical_hash_hex;
use crate::enumerate::MAX_ENUMERATION_NODES;
use crate::error::KrpError;
use crate::keys::KeyWidth;
use crate::KRP_SCHEMA_VERSION;

/// Which user pairs are simulated on each graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairSelection {
    /// The single pair `(0, 1)`.
    FirstTwo,
    /// Every unordered pair of nodes, simulated jointly in one run.
    AllPairs,
}

impl PairSelection {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "first_two" | "first-two" | "" => Some(Self::FirstTwo),
            "all_pairs" | "all-pairs" | "all" => Some(Self::AllPairs),
            _ => None,
        }
    }
}

impl fmt::Display for PairSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstTwo => write!(f, "first_two"),
            Self::AllPairs => write!(f, "all_pairs"),
        }
    }
}

/// Which adversaries each graph is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdversaryModel {
    /// Wiretaps nothing.
    Passive,
    /// Wiretaps every edge.
    AllEdges,
    /// One run per subset of the edge set (2^|E| runs per graph).
    EverySubset,
}

impl AdversaryModel {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "passive" | "none" => Some(Self::Passive),
            "all_edges" | "all-edges" | "all" | "" => Some(Self::AllEdges),
            "every_subset" | "every-subset" | "subsets" => Some(Self::EverySubset),
            _ => None,
        }
    }
}

impl fmt::Display for AdversaryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passive => write!(f, "passive"),
            Self::AllEdges => write!(f, "all_edges"),
            Self::EverySubset => write!(f, "every_subset"),
        }
    }
}

/// Parameters of an exhaustive sweep.
///
/// ## Parameters
///
/// - `n_nodes`: node count of the enumerated universe
/// - `seed`: base seed; graph `i` draws from stream `i` of this seed
/// - `key_width`: local key width in bits
/// - `pairs`: user pair selection per graph
/// - `adversary`: adversary model per graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Schema version the config was written against.
    pub version: String,
    /// Node count of every enumerated graph.
    pub n_nodes: usize,
    /// Base seed for local keys.
    pub seed: u64,
    /// Local key width.
    pub key_width: KeyWidth,
    /// User pair selection.
    pub pairs: PairSelection,
    /// Adversary model.
    pub adversary: AdversaryModel,
}

impl SweepConfig {
    /// Create a config with the default pair selection and adversary.
    pub fn new(n_nodes: usize, seed: u64) -> Self {
        Self { n_nodes, seed, ..Self::default() }
    }

    /// Small, fast config: three nodes, every wiretap subset.
    pub fn quick() -> Self {
        Self {
            n_nodes: 3,
            adversary: AdversaryModel::EverySubset,
            ..Self::default()
        }
    }

    /// Reject configs the enumerator would refuse.
    pub fn validate(&self) -> Result<(), KrpError> {
        if self.n_nodes > MAX_ENUMERATION_NODES {
            return Err(KrpError::InvalidNodeCount {
                requested: self.n_nodes,
                max: MAX_ENUMERATION_NODES,
            });
        }
        Ok(())
    }

    /// Hash of all parameters, recorded in every report.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            version: KRP_SCHEMA_VERSION.to_string(),
            n_nodes: 3,
            seed: 0,
            key_width: KeyWidth::default(),
            pairs: PairSelection::FirstTwo,
            adversary: AdversaryModel::AllEdges,
        }
    }
}
