//! Structural node features.
//!
//! Every node gets a fixed 3-dimensional feature computed from topology only:
//! `[eccentricity, ln(degree), local clustering coefficient]`.

use rayon::prelude::*;

use super::bfs::eccentricity;
use crate::models::{Graph, NodeId};

/// Width of a node feature vector.
pub const FEATURE_DIM: usize = 3;

/// Structural features of one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeFeatures {
    /// Largest finite hop distance to any other node (0 when isolated).
    pub eccentricity: f64,
    /// `ln(degree)`, or 0 for degree 0.
    pub log_degree: f64,
    /// Fraction of neighbor pairs that are adjacent; 0 when degree < 2.
    pub clustering: f64,
}

impl NodeFeatures {
    /// Features as a row in `[eccentricity, log_degree, clustering]` order.
    pub fn to_array(&self) -> [f64; FEATURE_DIM] {
        [self.eccentricity, self.log_degree, self.clustering]
    }
}

/// Compute features for every node, ordered by node index.
pub fn extract_features(graph: &Graph) -> Vec<NodeFeatures> {
    let ecc = eccentricity(graph);

    (0..graph.num_nodes() as u32)
        .into_par_iter()
        .map(|v| {
            let node = NodeId(v);
            let degree = graph.degree(node);
            NodeFeatures {
                eccentricity: ecc[v as usize] as f64,
                log_degree: if degree > 0 { (degree as f64).ln() } else { 0.0 },
                clustering: local_clustering(graph, node),
            }
        })
        .collect()
}

/// Local clustering coefficient of `node`.
fn local_clustering(graph: &Graph, node: NodeId) -> f64 {
    let neighbors = graph.neighbors(node);
    let degree = neighbors.len();
    if degree < 2 {
        return 0.0;
    }

    // Each triangle through `node` is seen once from each of its two other corners
    let twice_triangles: usize = neighbors
        .iter()
        .map(|&u| sorted_intersection_len(neighbors, graph.neighbors(NodeId(u))))
        .sum();

    let pairs = (degree * (degree - 1)) as f64;
    twice_triangles as f64 / pairs
}

/// Size of the intersection of two ascending slices.
fn sorted_intersection_len(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}
