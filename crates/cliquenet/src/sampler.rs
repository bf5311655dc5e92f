//! Greedy walker sampler.
//!
//! Nodes are ranked by score (descending; ties go to the lower index, NaN
//! ranks last) and only the top `window` ranks are ever considered. For a
//! start offset `r`, ranks before `r` are skipped, rank `r` is forced in, and
//! each later rank is kept only if the membership set stays complete:
//!
//! ```text
//! Z = k² − k − Σ_v s_v · (A s)_v == 0
//! ```
//!
//! `Σ s·(A s)` counts ordered adjacent pairs inside the set, so `Z == 0`
//! exactly when all `k(k − 1)` ordered pairs are edges. The walker keeps that
//! pair sum incrementally: adding `v` adds `2 · |N(v) ∩ S|`.

use std::cmp::Ordering;

use cliquenet_gnn::ScoreVector;
use cliquenet_graph::{Clique, Graph, GraphError, NodeId};

use crate::{Result, SolverError};

/// Ranked window of nodes plus the completeness tolerance.
#[derive(Debug, Clone)]
pub struct GreedyWalker {
    /// Node indices of the top `window` ranks, best first.
    ranking: Vec<u32>,
    num_nodes: usize,
    tolerance: f64,
}

impl GreedyWalker {
    /// Rank the nodes of `graph` by `scores`, keeping at most `window` ranks.
    pub fn new(graph: &Graph, scores: &ScoreVector, window: usize, tolerance: f64) -> Result<Self> {
        let n = graph.num_nodes();
        if scores.len() != n {
            return Err(GraphError::DimensionMismatch {
                expected: n,
                actual: scores.len(),
            }
            .into());
        }
        if !(tolerance > 0.0) {
            return Err(SolverError::Config(format!(
                "tolerance must be positive, got {}",
                tolerance
            )));
        }

        let mut ranking = rank_by_score(scores.as_slice());
        ranking.truncate(window.min(n));

        Ok(Self {
            ranking,
            num_nodes: n,
            tolerance,
        })
    }

    /// Number of ranks the walker considers.
    pub fn window(&self) -> usize {
        self.ranking.len()
    }

    /// Node indices in rank order.
    pub fn ranking(&self) -> &[u32] {
        &self.ranking
    }

    /// Build one candidate clique starting at rank `start_rank`.
    ///
    /// The result is a clique by construction but not necessarily maximal.
    /// A start at or past the window yields an empty candidate.
    pub fn sample(&self, graph: &Graph, start_rank: usize) -> Clique {
        let Some(&start) = self.ranking.get(start_rank) else {
            return Clique::new();
        };
        debug_assert_eq!(graph.num_nodes(), self.num_nodes);

        let mut member = vec![false; self.num_nodes];
        member[start as usize] = true;
        let mut nodes = vec![start];
        // Σ s·(A s) for the current set
        let mut pair_sum: u64 = 0;

        for &v in &self.ranking[start_rank + 1..] {
            let inside = graph
                .neighbors(NodeId(v))
                .iter()
                .filter(|&&u| member[u as usize])
                .count() as u64;

            let k = nodes.len() as u64 + 1;
            let candidate_sum = pair_sum + 2 * inside;
            let z = (k * k - k) as f64 - candidate_sum as f64;

            if z < self.tolerance {
                member[v as usize] = true;
                nodes.push(v);
                pair_sum = candidate_sum;
            }
        }

        Clique::from_nodes(nodes)
    }
}

/// Node indices sorted by descending score, ties to the lower index, NaN last.
pub fn rank_by_score(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<u32> = (0..scores.len() as u32).collect();
    order.sort_by(|&a, &b| {
        let (sa, sb) = (scores[a as usize], scores[b as usize]);
        let by_score = match (sa.is_nan(), sb.is_nan()) {
            (false, false) => sb.total_cmp(&sa),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => Ordering::Equal,
        };
        by_score.then(a.cmp(&b))
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliquenet_graph::quadratic_form;

    fn walker(graph: &Graph, scores: Vec<f64>, window: usize) -> GreedyWalker {
        GreedyWalker::new(graph, &ScoreVector::new(scores), window, 1e-4).unwrap()
    }

    #[test]
    fn test_rank_by_score() {
        assert_eq!(rank_by_score(&[0.1, 0.9, 0.5, 0.9]), vec![1, 3, 2, 0]);
        assert_eq!(rank_by_score(&[f64::NAN, 0.2, 0.3]), vec![2, 1, 0]);
        assert!(rank_by_score(&[]).is_empty());
    }

    #[test]
    fn test_triangle_plus_isolated() {
        let graph =
            Graph::from_adjacency_list(4, &[vec![1, 2], vec![0, 2], vec![0, 1], vec![]]).unwrap();
        let walker = walker(&graph, vec![0.9, 0.8, 0.7, 0.95], 4);

        assert_eq!(walker.ranking(), &[3, 0, 1, 2]);
        assert_eq!(walker.sample(&graph, 0).as_slice(), &[3]);
        assert_eq!(walker.sample(&graph, 1).as_slice(), &[0, 1, 2]);
        assert_eq!(walker.sample(&graph, 2).as_slice(), &[1, 2]);
    }

    #[test]
    fn test_window_truncates_candidates() {
        let graph = Graph::complete(5);
        let walker = walker(&graph, vec![0.5, 0.4, 0.3, 0.2, 0.1], 3);

        assert_eq!(walker.window(), 3);
        assert_eq!(walker.sample(&graph, 0).as_slice(), &[0, 1, 2]);
        assert!(walker.sample(&graph, 3).is_empty());
    }

    #[test]
    fn test_skips_non_adjacent_rank() {
        // Path 0-1-2 with 1 ranked first: {1, 0} then 2 rejected
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let walker = walker(&graph, vec![0.5, 0.9, 0.4], 3);
        assert_eq!(walker.sample(&graph, 0).as_slice(), &[0, 1]);
    }

    #[test]
    fn test_candidates_satisfy_quadratic_form() {
        let graph = Graph::from_edges(
            7,
            &[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4), (4, 5), (3, 5), (5, 6), (1, 3)],
        )
        .unwrap();
        let walker = walker(&graph, vec![0.3, 0.6, 0.2, 0.9, 0.1, 0.7, 0.4], 7);

        for start in 0..7 {
            let clique = walker.sample(&graph, start);
            let mut membership = vec![0.0; 7];
            for v in clique.iter() {
                membership[v.index()] = 1.0;
            }
            assert!(quadratic_form(&graph, &membership).unwrap().abs() < 1e-9);
            assert!(clique.is_clique(&graph));
        }
    }

    #[test]
    fn test_score_length_mismatch() {
        let graph = Graph::empty(3);
        let result = GreedyWalker::new(&graph, &ScoreVector::new(vec![0.0]), 3, 1e-4);
        assert!(matches!(result, Err(SolverError::Graph(_))));
    }
}
