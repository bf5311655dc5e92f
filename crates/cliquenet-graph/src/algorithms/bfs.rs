//! Breadth-first search algorithm.
//!
//! BFS computes shortest hop distances from a source node to all reachable
//! nodes. Running it from every node gives the eccentricity feature.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::models::{CsrMatrix, Distance, Graph, NodeId};
use crate::{GraphError, Result};

/// Sequential single-source BFS.
///
/// Uses a queue-based approach with O(V + E) complexity.
///
/// # Returns
///
/// Vector of distances, one per node. `Distance::INFINITY` for unreachable nodes.
pub fn bfs_sequential(adj: &CsrMatrix, source: NodeId) -> Result<Vec<Distance>> {
    if adj.num_rows == 0 {
        return Err(GraphError::EmptyGraph);
    }
    if source.index() >= adj.num_rows {
        return Err(GraphError::InvalidNodeId(source.0 as u64));
    }

    let mut distances = vec![Distance::INFINITY; adj.num_rows];
    let mut queue = VecDeque::new();
    distances[source.index()] = Distance::ZERO;
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        let next = distances[node.index()].increment();
        for &neighbor in adj.neighbors(node) {
            let slot = &mut distances[neighbor as usize];
            if *slot == Distance::INFINITY {
                *slot = next;
                queue.push_back(NodeId(neighbor));
            }
        }
    }

    Ok(distances)
}

/// Eccentricity of every node: the largest finite BFS distance to any other node.
///
/// Unreachable nodes are ignored, so an isolated node has eccentricity 0 and
/// each connected component is measured on its own. One BFS per node, run in
/// parallel across sources.
pub fn eccentricity(graph: &Graph) -> Vec<u32> {
    let adj = graph.adjacency();
    (0..graph.num_nodes() as u32)
        .into_par_iter()
        .map(|source| {
            // Source is always in range and the graph is non-empty here
            bfs_sequential(adj, NodeId(source))
                .map(|distances| {
                    distances
                        .iter()
                        .filter(|d| d.is_reachable())
                        .map(|d| d.get())
                        .max()
                        .unwrap_or(0)
                })
                .unwrap_or(0)
        })
        .collect()
}
