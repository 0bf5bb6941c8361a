//! # krp-verifier
//!
//! Exhaustive verification of the Key Relay Protocol (KRP) over small
//! undirected networks.
//!
//! In the KRP every edge of a relay network holds an independent random local
//! key. Two users derive a shared key by XOR-combining the local keys along a
//! path between them. The verifier answers two questions for every topology
//! and user pair:
//!
//! > Is the protocol **sound** (both endpoints derive the same key whenever
//! > they are connected) and **secret** (a wiretap adversary learns nothing
//! > about the derived key)?
//!
//! ## Architecture
//!
//! ```text
//! enumerate_all_graphs → Graph → simulate_krp ─┬─ assign_keys (KeyFabric)
//!                                              ├─ find_path (PathFinder)
//!                                              └─ verify_secrecy → rank_gf2
//!                                                        ↓
//!                                               SimulationResult
//! ```
//!
//! ## Secrecy
//!
//! The adversary knows every GF(2) combination of its wiretapped keys. A
//! derived key leaks iff the path's edge-indicator vector lies in the span of
//! the wiretapped edges' unit vectors, i.e. iff adding it does not raise the
//! GF(2) rank.
//!
//! ## Determinism Guarantees
//!
//! - Enumeration order is fixed for a given node count
//! - Edge indices follow the lexicographic `(lo, hi)` order
//! - Shortest-path ties are broken by lowest-indexed neighbour first
//! - All randomness comes from an injected, seedable generator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod error;
pub mod gf2;
pub mod enumerate;
pub mod keys;
pub mod pathfinder;
pub mod secrecy;
pub mod simulator;
pub mod topology;
pub mod sweep;
pub mod canonical;

// Re-exports
pub use types::{NodeId, Edge, Graph, Path, UserPair, Adversary};
pub use error::KrpError;
pub use gf2::{Gf2Vector, Gf2Basis, rank_gf2};
pub use enumerate::{enumerate_all_graphs, canonical_form, are_isomorphic, CanonicalForm, MAX_ENUMERATION_NODES};
pub use keys::{assign_keys, assign_keys_with_width, KeyWidth, LocalKeyAssignment};
pub use pathfinder::{find_path, connected};
pub use secrecy::{secrecy_holds, verify_secrecy, SecrecyVerdict};
pub use simulator::{
    simulate_krp, simulate_krp_with, SimulationConfig, SimulationResult,
    PairOutcome, Observation, Soundness,
};
pub use sweep::{
    run_sweep, sweep_graph, graph_rng,
    SweepConfig, PairSelection, AdversaryModel, SweepEntry, SweepReport,
};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};

/// Schema version for configs and reports.
/// Increment on breaking changes to any serialized type.
pub const KRP_SCHEMA_VERSION: &str = "krp_v1";
