//! Reward calculation for a batch of responses to one graph.

use std::collections::HashMap;

use serde::Serialize;

use cliquenet_graph::{Clique, Graph};

/// Per-response score columns, index-aligned with the responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardScores {
    /// Size relative to the largest valid response.
    pub rel: Vec<f64>,
    /// Fraction of responses strictly larger.
    pub pr: Vec<f64>,
    /// `exp(-pr / rel)` for valid responses.
    pub omega: Vec<f64>,
    /// `omega` divided by its maximum.
    pub optimality: Vec<f64>,
    /// Uniqueness of valid responses, divided by its maximum.
    pub diversity: Vec<f64>,
    /// `optimality * (1 + difficulty) + diversity`.
    pub rewards: Vec<f64>,
}

/// Scores responses claiming to be maximal cliques of one graph.
#[derive(Debug, Clone)]
pub struct RewardCalculator<'g> {
    graph: &'g Graph,
    difficulty: f64,
    responses: Vec<Vec<u32>>,
}

impl<'g> RewardCalculator<'g> {
    pub fn new(graph: &'g Graph, difficulty: f64, responses: Vec<Vec<u32>>) -> Self {
        Self {
            graph,
            difficulty,
            responses,
        }
    }

    pub fn responses(&self) -> &[Vec<u32>] {
        &self.responses
    }

    /// Non-empty, duplicate-free, in range, pairwise adjacent and maximal.
    pub fn is_valid_maximal_clique(&self, nodes: &[u32]) -> bool {
        if nodes.is_empty() {
            return false;
        }
        let n = self.graph.num_nodes();
        if nodes.iter().any(|&v| v as usize >= n) {
            return false;
        }
        let clique = Clique::from_nodes(nodes.iter().copied());
        if clique.len() != nodes.len() {
            return false;
        }
        clique.is_clique(self.graph) && clique.is_maximal(self.graph)
    }

    fn validity(&self) -> Vec<bool> {
        self.responses
            .iter()
            .map(|r| self.is_valid_maximal_clique(r))
            .collect()
    }

    /// `(rel, pr, omega, omega_normalized)`; all zeros when no response is
    /// valid.
    pub fn optimality(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let count = self.responses.len();
        let zeros = vec![0.0; count];

        let valid = self.validity();
        let size: Vec<f64> = self
            .responses
            .iter()
            .zip(&valid)
            .map(|(r, &ok)| if ok { r.len() as f64 } else { 0.0 })
            .collect();

        let max_size = size.iter().copied().fold(0.0, f64::max);
        if count == 0 || max_size <= 0.0 {
            return (zeros.clone(), zeros.clone(), zeros.clone(), zeros);
        }

        let rel: Vec<f64> = size.iter().map(|s| s / max_size).collect();
        let pr: Vec<f64> = size
            .iter()
            .map(|&s| size.iter().filter(|&&other| other > s).count() as f64 / count as f64)
            .collect();
        let omega: Vec<f64> = valid
            .iter()
            .enumerate()
            .map(|(i, &ok)| if ok { (-pr[i] / rel[i]).exp() } else { 0.0 })
            .collect();

        let max_omega = omega.iter().copied().fold(0.0, f64::max);
        let normalized = if max_omega == 0.0 {
            omega.clone()
        } else {
            omega.iter().map(|o| o / max_omega).collect()
        };
        (rel, pr, omega, normalized)
    }

    /// `1 / multiplicity` of each valid response's node set, normalized by
    /// the maximum.
    pub fn diversity(&self) -> Vec<f64> {
        let canonical: Vec<Vec<u32>> = self
            .responses
            .iter()
            .map(|r| {
                let mut sorted = r.clone();
                sorted.sort_unstable();
                sorted
            })
            .collect();

        let mut counts: HashMap<&[u32], usize> = HashMap::new();
        for c in &canonical {
            *counts.entry(c.as_slice()).or_insert(0) += 1;
        }

        let delta: Vec<f64> = self
            .validity()
            .iter()
            .zip(&canonical)
            .map(|(&ok, c)| {
                if ok {
                    1.0 / counts[c.as_slice()] as f64
                } else {
                    0.0
                }
            })
            .collect();

        let max_delta = delta.iter().copied().fold(0.0, f64::max);
        if max_delta == 0.0 {
            return delta;
        }
        delta.iter().map(|d| d / max_delta).collect()
    }

    /// Final reward per response.
    pub fn rewards(&self) -> Vec<f64> {
        self.scores().rewards
    }

    /// Every score column.
    pub fn scores(&self) -> RewardScores {
        let (rel, pr, omega, optimality) = self.optimality();
        let diversity = self.diversity();
        let rewards = optimality
            .iter()
            .zip(&diversity)
            .map(|(o, d)| o * (1.0 + self.difficulty) + d)
            .collect();

        RewardScores {
            rel,
            pr,
            omega,
            optimality,
            diversity,
            rewards,
        }
    }
}
