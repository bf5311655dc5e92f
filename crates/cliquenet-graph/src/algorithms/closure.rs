//! Maximal-clique closure.
//!
//! Extends a clique by repeatedly adding the lowest-indexed node adjacent to
//! every current member until no such node exists.

use crate::models::{Clique, Graph, NodeId};
use crate::Result;

/// Extend `clique` to an inclusion-maximal clique of `graph`.
///
/// Equivalent to "scan nodes in ascending order, add the first node whose
/// neighborhood contains the whole set, restart", computed in a single pass:
/// adding a member only removes candidates, so a node skipped earlier in the
/// scan can never become addable later. Runs in O(N + Σ degree).
///
/// Deterministic; ties between addable nodes go to the lower index. Applying
/// it to an already-maximal clique returns the clique unchanged.
///
/// # Errors
///
/// Returns an error if `clique` holds out-of-range nodes or a non-adjacent pair.
pub fn close_to_maximal(graph: &Graph, clique: &Clique) -> Result<Clique> {
    clique.validate(graph)?;

    let n = graph.num_nodes();
    let mut member = vec![false; n];
    // hits[v] = number of current members adjacent to v
    let mut hits = vec![0usize; n];

    for v in clique.iter() {
        add_member(graph, v, &mut member, &mut hits);
    }

    let mut closed: Vec<u32> = clique.as_slice().to_vec();
    for v in 0..n {
        if !member[v] && hits[v] == closed.len() {
            add_member(graph, NodeId(v as u32), &mut member, &mut hits);
            closed.push(v as u32);
        }
    }

    tracing::trace!(
        initial = clique.len(),
        closed = closed.len(),
        "clique closed to maximal"
    );

    Ok(Clique::from_nodes(closed))
}

fn add_member(graph: &Graph, v: NodeId, member: &mut [bool], hits: &mut [usize]) {
    member[v.index()] = true;
    for &u in graph.neighbors(v) {
        hits[u as usize] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    fn triangle_plus_isolated() -> Graph {
        Graph::from_adjacency_list(4, &[vec![1, 2], vec![0, 2], vec![0, 1], vec![]]).unwrap()
    }

    #[test]
    fn test_extends_to_triangle() {
        let graph = triangle_plus_isolated();
        let closed = close_to_maximal(&graph, &Clique::from_nodes([2u32])).unwrap();
        assert_eq!(closed.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_empty_clique_takes_lowest_index_first() {
        // Two disjoint edges 0-3 and 1-2: starting empty picks 0, then 3
        let graph = Graph::from_edges(4, &[(0, 3), (1, 2)]).unwrap();
        let closed = close_to_maximal(&graph, &Clique::new()).unwrap();
        assert_eq!(closed.as_slice(), &[0, 3]);
    }

    #[test]
    fn test_idempotent() {
        let graph = Graph::from_edges(6, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
        let once = close_to_maximal(&graph, &Clique::from_nodes([3u32])).unwrap();
        let twice = close_to_maximal(&graph, &once).unwrap();
        assert_eq!(once, twice);
        assert!(once.is_maximal(&graph));
    }

    #[test]
    fn test_complete_graph() {
        let graph = Graph::complete(6);
        let closed = close_to_maximal(&graph, &Clique::from_nodes([4u32])).unwrap();
        assert_eq!(closed.len(), 6);
    }

    #[test]
    fn test_rejects_invalid_clique() {
        let graph = triangle_plus_isolated();
        let result = close_to_maximal(&graph, &Clique::from_nodes([0u32, 3]));
        assert!(matches!(result, Err(GraphError::NotAClique(_))));
    }

    #[test]
    fn test_empty_graph() {
        let closed = close_to_maximal(&Graph::empty(0), &Clique::new()).unwrap();
        assert!(closed.is_empty());
    }
}
