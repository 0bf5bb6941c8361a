//! Sweep results.

use serde::Serialize;

use crate::canonical::canonical_hash_hex;
use crate::types::Edge;

/// Aggregated outcome for one enumerated graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepEntry {
    /// Position of the graph in enumeration order.
    pub graph_index: usize,
    /// Fingerprint of the labelled representative.
    pub graph_fingerprint: String,
    /// Edges of the representative.
    pub edges: Vec<Edge>,
    /// Simulations run on this graph.
    pub cases: usize,
    /// Simulations in which every pair derived a common key.
    pub sound_cases: usize,
    /// Simulations in which no pair's key leaked.
    pub secret_cases: usize,
    /// Wiretap set of the first breached simulation, if any.
    pub first_breach: Option<Vec<Edge>>,
}

impl SweepEntry {
    /// Every simulation on this graph was sound.
    pub fn always_sound(&self) -> bool {
        self.sound_cases == self.cases
    }

    /// Every simulation on this graph was secret.
    pub fn always_secret(&self) -> bool {
        self.secret_cases == self.cases
    }
}

/// Result of an exhaustive sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Schema version of the report.
    pub schema_version: String,
    /// Hash of the config that produced the report.
    pub params_hash: String,
    /// Node count of the universe.
    pub n_nodes: usize,
    /// Number of isomorphism classes.
    pub graph_count: usize,
    /// Total simulations.
    pub total_cases: usize,
    /// Total sound simulations.
    pub sound_cases: usize,
    /// Total secret simulations.
    pub secret_cases: usize,
    /// Per-graph entries in enumeration order.
    pub entries: Vec<SweepEntry>,
    /// Hash of the entries for integrity verification.
    pub report_hash: String,
}

impl SweepReport {
    /// Assemble a report and compute its totals and hash.
    pub fn new(schema_version: &str, params_hash: String, n_nodes: usize, entries: Vec<SweepEntry>) -> Self {
        let report_hash = canonical_hash_hex(&entries);
        Self {
            schema_version: schema_version.to_string(),
            params_hash,
            n_nodes,
            graph_count: entries.len(),
            total_cases: entries.iter().map(|e| e.cases).sum(),
            sound_cases: entries.iter().map(|e| e.sound_cases).sum(),
            secret_cases: entries.iter().map(|e| e.secret_cases).sum(),
            entries,
            report_hash,
        }
    }

    /// Get entry by graph index.
    pub fn entry(&self, graph_index: usize) -> Option<&SweepEntry> {
        self.entries.iter().find(|e| e.graph_index == graph_index)
    }

    /// Graphs on which at least one simulation leaked a key.
    pub fn breached_graphs(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| !e.always_secret())
            .map(|e| e.graph_index)
            .collect()
    }
}
