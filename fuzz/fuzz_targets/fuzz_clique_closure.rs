//! Fuzz target for the maximal-clique closure.
//!
//! Closes a single random node in a random graph and verifies the result is
//! a maximal clique and a fixed point of the closure.

#![no_main]

use arbitrary::Arbitrary;
use cliquenet_graph::{close_to_maximal, Clique, Graph};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    nodes: u8,
    edges: Vec<(u8, u8)>,
    seed_node: u8,
}

fuzz_target!(|input: FuzzInput| {
    let n = input.nodes as usize;
    if n == 0 {
        return;
    }
    let edges: Vec<(u32, u32)> = input
        .edges
        .iter()
        .map(|&(a, b)| (a as u32 % n as u32, b as u32 % n as u32))
        .filter(|(a, b)| a != b)
        .collect();
    let graph = Graph::from_edges(n, &edges).expect("symmetrized edges form a graph");

    let start = Clique::from_nodes([input.seed_node as u32 % n as u32]);
    let closed = close_to_maximal(&graph, &start).expect("singleton is a clique");

    assert!(closed.is_clique(&graph));
    assert!(closed.is_maximal(&graph));
    assert_eq!(close_to_maximal(&graph, &closed).expect("closed is a clique"), closed);
});
