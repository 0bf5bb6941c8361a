//! Key Relay Protocol simulator.
//!
//! One run binds a graph, a fresh local key assignment, a set of user pairs
//! and one wiretap adversary, and produces a [`SimulationResult`].
//!
//! ## Run
//!
//! 1. Validate every pair and every wiretapped edge (fail before any work)
//! 2. Draw local keys from the injected generator
//! 3. For each pair, find a shortest path and XOR the local keys along it;
//!    both endpoints hold that key (soundness fails on the first pair
//!    without a path)
//! 4. Record the adversary's observed keys, in edge-index order
//! 5. Check secrecy per connected pair with the GF(2) rank oracle; the run is
//!    secret only if every pair is
//!
//! The textual log is data for reporting; its wording is not a contract
//! beyond carrying the edge keys, paths, derived keys, observations and
//! per-pair verdicts.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::KrpError;
use crate::keys::{assign_keys_with_width, KeyWidth};
use crate::pathfinder::find_path;
use crate::secrecy::{verify_secrecy, SecrecyVerdict};
use crate::types::{Adversary, Edge, Graph, NodeId, UserPair};

/// Per-run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Width of each local key.
    #[serde(default)]
    pub key_width: KeyWidth,
}

impl SimulationConfig {
    /// Configuration with a custom key width.
    pub fn with_key_width(key_width: KeyWidth) -> Self {
        Self { key_width }
    }
}

/// Soundness state of a run. Starts `Sound`; `Unsound` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Soundness {
    /// Every pair seen so far derived a common key.
    Sound,
    /// Some pair could not derive a common key.
    Unsound,
}

impl Soundness {
    /// Advance with the outcome of one pair.
    pub fn observe(self, pair_agrees: bool) -> Self {
        match self {
            Self::Sound if pair_agrees => Self::Sound,
            _ => Self::Unsound,
        }
    }

    /// Whether the state is `Sound`.
    pub fn is_sound(&self) -> bool {
        matches!(self, Self::Sound)
    }
}

/// What happened to one user pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairOutcome {
    /// First endpoint.
    pub u1: NodeId,
    /// Second endpoint.
    pub u2: NodeId,
    /// Nodes of the relay path, if one exists.
    pub path: Option<Vec<NodeId>>,
    /// Shared key, if the endpoints are connected.
    pub key: Option<u64>,
    /// Secrecy verdict, if the endpoints are connected.
    pub secrecy: Option<SecrecyVerdict>,
}

/// Local key of one wiretapped edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// Wiretapped edge.
    pub edge: Edge,
    /// Its local key.
    pub key: u64,
}

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    /// Every pair derived a common key.
    pub sound: bool,
    /// No connected pair's key lies in the adversary's span.
    pub secrecy: bool,
    /// Human-readable trace.
    pub log: Vec<String>,
    /// Per-pair outcomes, in input order.
    pub pairs: Vec<PairOutcome>,
    /// Adversary observations, in edge-index order.
    pub observations: Vec<Observation>,
    /// Key width used for the run.
    pub key_width: KeyWidth,
}

impl SimulationResult {
    /// Pairs whose key the adversary can reconstruct.
    pub fn breached_pairs(&self) -> impl Iterator<Item = &PairOutcome> {
        self.pairs
            .iter()
            .filter(|p| p.secrecy.map(|v| v.is_breach()).unwrap_or(false))
    }
}

/// Simulate the protocol with single-bit local keys.
pub fn simulate_krp<R: Rng + ?Sized>(
    graph: &Graph,
    user_pairs: &mut [UserPair],
    adversary: &mut Adversary,
    rng: &mut R,
) -> Result<SimulationResult, KrpError> {
    simulate_krp_with(graph, user_pairs, adversary, &SimulationConfig::default(), rng)
}

/// Simulate the protocol with an explicit configuration.
///
/// Fills in each pair's path and keys and the adversary's observations.
/// Fails without touching them if any pair or wiretapped edge is invalid.
pub fn simulate_krp_with<R: Rng + ?Sized>(
    graph: &Graph,
    user_pairs: &mut [UserPair],
    adversary: &mut Adversary,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationResult, KrpError> {
    for pair in user_pairs.iter() {
        graph.check_node(pair.u1())?;
        graph.check_node(pair.u2())?;
    }
    adversary.validate(graph)?;
    let wiretap_vectors = adversary.wiretap_vectors(graph)?;

    let mut log = Vec::new();

    let keys = assign_keys_with_width(graph, config.key_width, rng);
    for (edge, key) in graph.edges().iter().zip(keys.keys()) {
        log.push(format!("Local key for edge {}: {}", edge, key));
    }

    let mut soundness = Soundness::Sound;
    let mut pending = Vec::with_capacity(user_pairs.len());

    for pair in user_pairs.iter_mut() {
        pair.reset();
        let label = format!("UserPair ({},{})", pair.u1(), pair.u2());

        match find_path(graph, pair.u1(), pair.u2())? {
            Some(path) => {
                // XOR is order-independent: both endpoints hold the same key.
                let key = keys.xor_of(path.edge_indices());

                log.push(format!("{} path: {}, key: {}", label, path, key));
                debug!(u1 = %pair.u1(), u2 = %pair.u2(), hops = path.len(), "relay path found");

                soundness = soundness.observe(true);
                pending.push(Some(path.indicator(graph.num_edges())));
                pair.k1 = Some(key);
                pair.k2 = Some(key);
                pair.path = Some(path);
            }
            None => {
                log.push(format!("{} has no connecting path.", label));
                debug!(u1 = %pair.u1(), u2 = %pair.u2(), "no relay path");

                soundness = soundness.observe(false);
                pending.push(None);
            }
        }
    }

    let observations: Vec<Observation> = adversary
        .wiretapped()
        .iter()
        .filter_map(|edge| {
            let key = graph.edge_index(edge).and_then(|i| keys.key(i))?;
            Some(Observation { edge: *edge, key })
        })
        .collect();
    adversary.observed = observations.iter().map(|o| o.key).collect();

    let tapped: Vec<String> = adversary.wiretapped().iter().map(Edge::to_string).collect();
    let observed: Vec<String> = adversary.observed.iter().map(u64::to_string).collect();
    log.push(format!(
        "Adversary wiretapped edges: [{}], observed keys: [{}]",
        tapped.join(", "),
        observed.join(", ")
    ));

    let mut secrecy = true;
    let mut outcomes = Vec::with_capacity(user_pairs.len());

    for (pair, path_vector) in user_pairs.iter().zip(pending) {
        let label = format!("UserPair ({},{})", pair.u1(), pair.u2());
        let verdict = path_vector.map(|v| verify_secrecy(&wiretap_vectors, &v));

        if let Some(verdict) = verdict {
            if verdict.holds {
                log.push(format!(
                    "{} secrecy holds: rank {} -> {}",
                    label, verdict.rank_without_path, verdict.rank_with_path
                ));
            } else {
                log.push(format!(
                    "{} SECRECY BREACH: path key is a combination of observed keys (rank {} -> {})",
                    label, verdict.rank_without_path, verdict.rank_with_path
                ));
                warn!(u1 = %pair.u1(), u2 = %pair.u2(), rank = verdict.rank_without_path, "secrecy breach");
            }
            secrecy &= verdict.holds;
        }

        outcomes.push(PairOutcome {
            u1: pair.u1(),
            u2: pair.u2(),
            path: pair.path().map(|p| p.nodes().to_vec()),
            key: pair.key(),
            secrecy: verdict,
        });
    }

    let sound = soundness.is_sound();
    log.push(format!("Verdict: sound={}, secrecy={}", sound, secrecy));

    Ok(SimulationResult {
        sound,
        secrecy,
        log,
        pairs: outcomes,
        observations,
        key_width: config.key_width,
    })
}
