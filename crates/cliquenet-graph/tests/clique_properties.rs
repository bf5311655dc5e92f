//! Property tests for the completeness form and the maximal-clique closure.

use cliquenet_graph::{close_to_maximal, induces_clique, quadratic_form, Clique, Graph};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random simple graph on `n` nodes with edge probability `p`.
fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for a in 0..n as u32 {
        for b in (a + 1)..n as u32 {
            if rng.gen::<f64>() < p {
                edges.push((a, b));
            }
        }
    }
    Graph::from_edges(n, &edges).unwrap()
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1usize..=20, 0.0f64..=1.0, any::<u64>()).prop_map(|(n, p, seed)| random_graph(n, p, seed))
}

proptest! {
    /// Z(s) == 0 exactly when the membership set is pairwise adjacent.
    #[test]
    fn quadratic_form_matches_pairwise_check(graph in graph_strategy(), mask in any::<u32>()) {
        let n = graph.num_nodes();
        let nodes: Vec<u32> = (0..n as u32).filter(|&v| mask & (1 << v) != 0).collect();
        let mut membership = vec![0.0; n];
        for &v in &nodes {
            membership[v as usize] = 1.0;
        }

        let z = quadratic_form(&graph, &membership).unwrap();
        prop_assert!(z > -1e-9);
        prop_assert_eq!(z.abs() < 1e-4, induces_clique(&graph, &nodes));
    }

    /// Closing twice gives the same clique as closing once, and the result is maximal.
    #[test]
    fn closure_is_idempotent_and_maximal(graph in graph_strategy(), seed_node in any::<u32>()) {
        let start = Clique::from_nodes([seed_node % graph.num_nodes() as u32]);

        let once = close_to_maximal(&graph, &start).unwrap();
        let twice = close_to_maximal(&graph, &once).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert!(once.is_clique(&graph));
        prop_assert!(once.is_maximal(&graph));
        prop_assert!(start.iter().all(|v| once.contains(v)));
    }
}

/// A fully disconnected graph closes to a single node.
#[test]
fn test_disconnected_graph_closes_to_singleton() {
    let graph = Graph::empty(7);
    let closed = close_to_maximal(&graph, &Clique::new()).unwrap();
    assert_eq!(closed.as_slice(), &[0]);
}

/// The closure reproduces the rescanning reference on random graphs.
#[test]
fn test_closure_matches_rescanning_reference() {
    for seed in 0..50u64 {
        let graph = random_graph(15, 0.5, seed);
        let start = Clique::from_nodes([(seed % 15) as u32]);

        let mut reference: Vec<u32> = start.as_slice().to_vec();
        'rescan: loop {
            for v in 0..15u32 {
                if reference.contains(&v) {
                    continue;
                }
                if reference.iter().all(|&m| graph.neighbors(v.into()).contains(&m)) {
                    reference.push(v);
                    continue 'rescan;
                }
            }
            break;
        }

        let closed = close_to_maximal(&graph, &start).unwrap();
        assert_eq!(closed, Clique::from_nodes(reference), "seed {}", seed);
    }
}
