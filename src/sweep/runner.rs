//! Sweep execution.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, info_span, warn};

use super::config::{AdversaryModel, PairSelection, SweepConfig};
use super::report::{SweepEntry, SweepReport};
use crate::enumerate::{enumerate_all_graphs, MAX_ENUMERATION_NODES};
use crate::error::KrpError;
use crate::simulator::{simulate_krp_with, SimulationConfig};
use crate::types::{Adversary, Graph, UserPair};
use crate::KRP_SCHEMA_VERSION;

/// Generator for one graph of a sweep: `seed`, stream `graph_index`.
pub fn graph_rng(seed: u64, graph_index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(graph_index as u64);
    rng
}

fn user_pairs(graph: &Graph, selection: PairSelection) -> Result<Vec<UserPair>, KrpError> {
    let n = graph.n_nodes() as u32;
    match selection {
        PairSelection::FirstTwo if n >= 2 => Ok(vec![UserPair::new(0u32, 1u32)?]),
        PairSelection::FirstTwo => Ok(Vec::new()),
        PairSelection::AllPairs => (0..n)
            .flat_map(|a| (a + 1..n).map(move |b| (a, b)))
            .map(|(a, b)| UserPair::new(a, b))
            .collect(),
    }
}

fn adversaries(graph: &Graph, model: AdversaryModel) -> Vec<Adversary> {
    match model {
        AdversaryModel::Passive => vec![Adversary::passive()],
        AdversaryModel::AllEdges => vec![Adversary::wiretap_all(graph)],
        AdversaryModel::EverySubset => (0..1u64 << graph.num_edges())
            .map(|mask| Adversary::from_mask(graph, mask))
            .collect(),
    }
}

/// Run every configured case on one graph.
///
/// Graphs over `MAX_ENUMERATION_NODES` nodes are rejected, which keeps every
/// wiretap subset within a 64-bit edge mask.
pub fn sweep_graph(
    graph_index: usize,
    graph: &Graph,
    config: &SweepConfig,
) -> Result<SweepEntry, KrpError> {
    if graph.n_nodes() > MAX_ENUMERATION_NODES {
        return Err(KrpError::InvalidNodeCount {
            requested: graph.n_nodes(),
            max: MAX_ENUMERATION_NODES,
        });
    }
    let sim_config = SimulationConfig::with_key_width(config.key_width);
    let mut rng = graph_rng(config.seed, graph_index);
    let template = user_pairs(graph, config.pairs)?;

    let mut entry = SweepEntry {
        graph_index,
        graph_fingerprint: graph.fingerprint(),
        edges: graph.edges().to_vec(),
        cases: 0,
        sound_cases: 0,
        secret_cases: 0,
        first_breach: None,
    };

    if template.is_empty() {
        debug!(graph_index, "no user pairs on graph; skipped");
        return Ok(entry);
    }

    for mut adversary in adversaries(graph, config.adversary) {
        let mut pairs = template.clone();
        let result = simulate_krp_with(graph, &mut pairs, &mut adversary, &sim_config, &mut rng)?;

        entry.cases += 1;
        if result.sound {
            entry.sound_cases += 1;
        }
        if result.secrecy {
            entry.secret_cases += 1;
        } else if entry.first_breach.is_none() {
            entry.first_breach = Some(adversary.wiretapped().iter().copied().collect());
        }
    }

    if entry.first_breach.is_some() {
        warn!(
            graph_index,
            breached = entry.cases - entry.secret_cases,
            cases = entry.cases,
            "secrecy breached on graph"
        );
    }

    Ok(entry)
}

/// Enumerate the universe and simulate every configured case.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport, KrpError> {
    config.validate()?;
    let span = info_span!("sweep", n_nodes = config.n_nodes, seed = config.seed);
    let _guard = span.enter();

    let graphs = enumerate_all_graphs(config.n_nodes)?;
    let entries = graphs
        .iter()
        .enumerate()
        .map(|(i, g)| sweep_graph(i, g, config))
        .collect::<Result<Vec<_>, _>>()?;

    let report = SweepReport::new(KRP_SCHEMA_VERSION, config.params_hash(), config.n_nodes, entries);
    info!(
        graphs = report.graph_count,
        cases = report.total_cases,
        sound = report.sound_cases,
        secret = report.secret_cases,
        "sweep complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_graph_streams_are_independent() {
        let a: u64 = graph_rng(7, 0).gen();
        let b: u64 = graph_rng(7, 1).gen();
        let a_again: u64 = graph_rng(7, 0).gen();
        assert_ne!(a, b);
        assert_eq!(a, a_again);
    }

    #[test]
    fn test_all_pairs_selection() {
        let g = Graph::empty(4);
        assert_eq!(user_pairs(&g, PairSelection::AllPairs).unwrap().len(), 6);
        assert_eq!(user_pairs(&Graph::empty(1), PairSelection::FirstTwo).unwrap().len(), 0);
    }

    #[test]
    fn test_every_subset_count() {
        let g = Graph::from_pairs(3, &[(0, 1), (0, 2), (1, 2)]).unwrap();
        assert_eq!(adversaries(&g, AdversaryModel::EverySubset).len(), 8);
    }

    #[test]
    fn test_sweep_graph_rejects_oversized_graph() {
        let config = SweepConfig {
            adversary: AdversaryModel::EverySubset,
            ..SweepConfig::default()
        };
        let g = crate::topology::complete(12);

        assert_eq!(
            sweep_graph(0, &g, &config),
            Err(KrpError::InvalidNodeCount { requested: 12, max: MAX_ENUMERATION_NODES })
        );

        let largest = crate::topology::complete(MAX_ENUMERATION_NODES);
        let entry = sweep_graph(0, &largest, &config).unwrap();
        assert_eq!(entry.cases, 1 << largest.num_edges());
    }

    #[test]
    fn test_three_node_full_wiretap() {
        let report = run_sweep(&SweepConfig::new(3, 11)).unwrap();

        assert_eq!(report.graph_count, 4);
        assert_eq!(report.total_cases, 4);
        // Pair (0, 1) is connected only on the path and the triangle.
        assert_eq!(report.sound_cases, 2);
        // With every edge tapped, every connected pair leaks.
        assert_eq!(report.breached_graphs().len(), 2);
    }

    #[test]
    fn test_sweep_determinism() {
        let config = SweepConfig::quick();
        let a = run_sweep(&config).unwrap();
        let b = run_sweep(&config).unwrap();
        assert_eq!(a.report_hash, b.report_hash);
        assert_eq!(a.params_hash, config.params_hash());
    }
}
