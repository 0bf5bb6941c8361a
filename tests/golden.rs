//! Golden tests for the KRP verifier.
//!
//! These tests pin enumeration counts, the worked soundness and secrecy
//! scenarios, and determinism under a fixed seed.

use krp_verifier::{
    enumerate_all_graphs, canonical_form, are_isomorphic, find_path,
    simulate_krp, secrecy_holds, rank_gf2, run_sweep, topology,
    Adversary, Edge, Gf2Vector, Graph, KrpError, NodeId, UserPair,
    SweepConfig, AdversaryModel, PairSelection, MAX_ENUMERATION_NODES,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed for every fixture in this file.
const TEST_SEED: u64 = 0x6b72_7000;

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(TEST_SEED)
}

fn edge(a: u32, b: u32) -> Edge {
    Edge::new(a, b).unwrap()
}

fn triangle() -> Graph {
    Graph::from_pairs(3, &[(0, 1), (0, 2), (1, 2)]).unwrap()
}

fn square() -> Graph {
    Graph::from_pairs(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
}

fn all_permutations(n: u32) -> Vec<Vec<NodeId>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for rest in all_permutations(n - 1) {
        for pos in 0..=rest.len() {
            let mut perm = rest.clone();
            perm.insert(pos, NodeId(n - 1));
            out.push(perm);
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// ENUMERATION TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_isomorphism_class_counts() {
    let expected = [1, 1, 2, 4, 11, 34, 156];
    for (n, &count) in expected.iter().enumerate() {
        assert_eq!(
            enumerate_all_graphs(n).unwrap().len(),
            count,
            "wrong number of classes for n = {}",
            n
        );
    }
}

#[test]
fn test_enumerated_graphs_pairwise_non_isomorphic() {
    let graphs = enumerate_all_graphs(4).unwrap();
    for i in 0..graphs.len() {
        for j in (i + 1)..graphs.len() {
            assert!(
                !are_isomorphic(&graphs[i], &graphs[j]).unwrap(),
                "graphs {} and {} are isomorphic",
                i,
                j
            );
        }
    }
}

#[test]
fn test_canonical_form_survives_every_relabelling() {
    for graph in enumerate_all_graphs(4).unwrap() {
        let form = canonical_form(&graph).unwrap();
        for perm in all_permutations(4) {
            let relabelled = graph.relabel(&perm).unwrap();
            assert_eq!(canonical_form(&relabelled).unwrap(), form);
        }
    }
}

#[test]
fn test_single_node_universe() {
    let graphs = enumerate_all_graphs(1).unwrap();
    assert_eq!(graphs[0].n_nodes(), 1);
    assert_eq!(graphs[0].num_edges(), 0);
}

#[test]
fn test_enumeration_rejects_oversized_universe() {
    let err = enumerate_all_graphs(MAX_ENUMERATION_NODES + 1).unwrap_err();
    assert!(err.to_string().contains("node count"));
}

// ─────────────────────────────────────────────────────────────────────────────
// SOUNDNESS TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_triangle_is_sound() {
    let mut pairs = vec![UserPair::new(0u32, 1u32).unwrap()];
    let mut adversary = Adversary::passive();

    let result = simulate_krp(&triangle(), &mut pairs, &mut adversary, &mut rng()).unwrap();

    assert!(result.sound);
    assert_eq!(pairs[0].k1(), pairs[0].k2());
}

#[test]
fn test_disconnected_pair_is_unsound() {
    let g = Graph::from_pairs(4, &[(0, 1), (2, 3)]).unwrap();
    let mut pairs = vec![UserPair::new(0u32, 3u32).unwrap()];
    let mut adversary = Adversary::passive();

    let result = simulate_krp(&g, &mut pairs, &mut adversary, &mut rng()).unwrap();

    assert!(!result.sound);
    assert_eq!(pairs[0].key(), None);
}

#[test]
fn test_soundness_matches_connectivity_everywhere() {
    for graph in enumerate_all_graphs(4).unwrap() {
        for a in 0..4u32 {
            for b in (a + 1)..4u32 {
                let connected = find_path(&graph, NodeId(a), NodeId(b)).unwrap().is_some();
                let mut pairs = vec![UserPair::new(a, b).unwrap()];
                let mut adversary = Adversary::passive();
                let result = simulate_krp(&graph, &mut pairs, &mut adversary, &mut rng()).unwrap();
                assert_eq!(result.sound, connected);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SECRECY TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_wiretap_on_triangle_breaches() {
    let g = triangle();
    let mut pairs = vec![UserPair::new(0u32, 1u32).unwrap()];
    let mut adversary = Adversary::wiretap_all(&g);

    let result = simulate_krp(&g, &mut pairs, &mut adversary, &mut rng()).unwrap();

    assert!(result.sound);
    assert!(!result.secrecy);
    assert!(result.log.iter().any(|l| l.contains("SECRECY BREACH")));
}

#[test]
fn test_square_with_tapped_far_edge_stays_secret() {
    let g = square();
    let mut pairs = vec![UserPair::new(0u32, 3u32).unwrap()];
    let mut adversary = Adversary::new([edge(1, 2)]);

    let result = simulate_krp(&g, &mut pairs, &mut adversary, &mut rng()).unwrap();

    assert!(result.sound);
    assert!(result.secrecy);
    assert_eq!(pairs[0].path().unwrap().edges(&g), vec![edge(0, 3)]);
}

#[test]
fn test_secrecy_oracle_on_worked_examples() {
    let g = triangle();
    let tapped = Adversary::wiretap_all(&g).wiretap_vectors(&g).unwrap();
    let path = g.indicator([&edge(0, 1)]).unwrap();
    assert!(!secrecy_holds(&tapped, &path));

    let g = square();
    let tapped = Adversary::new([edge(1, 2)]).wiretap_vectors(&g).unwrap();
    let path = g.indicator([&edge(0, 3)]).unwrap();
    assert!(secrecy_holds(&tapped, &path));
}

#[test]
fn test_line_scenarios() {
    // 0-1-2 fully tapped: key is the XOR of both observed keys.
    let g = topology::line(3);
    let mut pairs = vec![UserPair::new(0u32, 2u32).unwrap()];
    let mut adversary = Adversary::wiretap_all(&g);
    let result = simulate_krp(&g, &mut pairs, &mut adversary, &mut rng()).unwrap();
    assert!(result.sound);
    assert!(!result.secrecy);

    // 0-1-2-3 with only the middle edge tapped.
    let g = topology::line(4);
    let mut pairs = vec![UserPair::new(0u32, 3u32).unwrap()];
    let mut adversary = Adversary::new([edge(1, 2)]);
    let result = simulate_krp(&g, &mut pairs, &mut adversary, &mut rng()).unwrap();
    assert!(result.sound);
    assert!(result.secrecy);
}

#[test]
fn test_rank_properties() {
    assert_eq!(rank_gf2(&[]), 0);

    let a = Gf2Vector::from_bits(&[true, false, true]);
    let b = Gf2Vector::from_bits(&[false, true, true]);
    let zero = Gf2Vector::zeros(3);

    assert_eq!(rank_gf2(&[a.clone(), zero.clone(), b.clone()]), rank_gf2(&[a.clone(), b.clone()]));
    assert_eq!(rank_gf2(&[a.clone(), b.clone()]), rank_gf2(&[b.clone(), a.clone()]));

    let mut sum = a.clone();
    sum.xor_assign(&b);
    assert_eq!(rank_gf2(&[a, b, sum]), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// OBSERVATION TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_observations_only_cover_tapped_edges() {
    let g = topology::complete(4);
    let tapped = [edge(2, 3), edge(0, 2)];
    let mut pairs = vec![UserPair::new(0u32, 1u32).unwrap()];
    let mut adversary = Adversary::new(tapped);

    let result = simulate_krp(&g, &mut pairs, &mut adversary, &mut rng()).unwrap();

    let observed_edges: Vec<Edge> = result.observations.iter().map(|o| o.edge).collect();
    assert_eq!(observed_edges, vec![edge(0, 2), edge(2, 3)]);
    assert_eq!(adversary.observed_keys().len(), 2);

    // Observed keys are the local keys logged for those edges.
    for obs in &result.observations {
        let line = format!("Local key for edge {}: {}", obs.edge, obs.key);
        assert!(result.log.contains(&line), "missing log line {:?}", line);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// INPUT VALIDATION TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_inputs_name_the_culprit() {
    assert_eq!(UserPair::new(2u32, 2u32).unwrap_err(), KrpError::DegeneratePair(NodeId(2)));

    let g = triangle();
    let mut pairs = vec![UserPair::new(0u32, 1u32).unwrap()];
    let mut adversary = Adversary::new([edge(0, 3)]);
    let err = simulate_krp(&g, &mut pairs, &mut adversary, &mut rng()).unwrap_err();
    assert_eq!(err, KrpError::UnknownAdversaryEdge(edge(0, 3)));
    assert!(err.to_string().contains("(0, 3)"));
}

// ─────────────────────────────────────────────────────────────────────────────
// DETERMINISM TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_same_seed_same_result() {
    let g = topology::ring(5);
    let run = || {
        let mut pairs = vec![UserPair::new(0u32, 2u32).unwrap(), UserPair::new(1u32, 4u32).unwrap()];
        let mut adversary = Adversary::new([edge(0, 1), edge(3, 4)]);
        simulate_krp(&g, &mut pairs, &mut adversary, &mut rng()).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_sweep_report_hash_stable() {
    let config = SweepConfig {
        n_nodes: 4,
        seed: TEST_SEED,
        pairs: PairSelection::AllPairs,
        adversary: AdversaryModel::EverySubset,
        ..SweepConfig::default()
    };

    let first = run_sweep(&config).unwrap();
    let second = run_sweep(&config).unwrap();

    assert_eq!(first.graph_count, 11);
    assert_eq!(first.report_hash, second.report_hash);
    // The passive subset (mask 0) is always secret, so no graph is breached
    // in every case; the complete graph is breached in some.
    let complete = first.entries.last().unwrap();
    assert_eq!(complete.edges.len(), 6);
    assert!(complete.secret_cases > 0);
    assert!(complete.first_breach.is_some());
}
