//! Exhaustive sweeps: enumerate every graph, then simulate on each.
//!
//! ## Core Contract
//!
//! Given the same [`SweepConfig`], a sweep produces an identical
//! [`SweepReport`] (same `report_hash`). Graph `i` draws its local keys from
//! stream `i` of a `ChaCha8Rng` seeded with the config's seed, so no graph's
//! randomness depends on how many draws another graph made.
//!
//! ## Pipeline
//!
//! ```text
//! SweepConfig → enumerate_all_graphs → per graph: pairs × adversaries → simulate_krp_with → SweepEntry
//!                                                                                             ↓
//!                                                                                        SweepReport
//! ```

pub mod config;
pub mod report;
pub mod runner;

pub use config::{SweepConfig, PairSelection, AdversaryModel};
pub use report::{SweepEntry, SweepReport};
pub use runner::{run_sweep, sweep_graph, graph_rng};
