//! Solver orchestrator and the baseline solver.

use std::sync::Arc;

use rayon::prelude::*;

use cliquenet_gnn::ScoringNetwork;
use cliquenet_graph::{close_to_maximal, Clique, Graph, NodeId};

use crate::candidates::ScoringService;
use crate::config::{CliqueConfig, SolverConfig};
use crate::{Result, SolverError};

/// Anything that turns a graph into a maximal clique.
///
/// Implementations must return a clique whose every pair is adjacent and
/// that no outside node can extend (empty only for an empty graph).
pub trait CliqueSolver: Send + Sync {
    /// Find a large maximal clique.
    fn solve(&self, graph: &Graph) -> Result<Clique>;

    /// Short name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Validate an adjacency list, solve it and return sorted node indices.
pub fn solve_adjacency(
    solver: &dyn CliqueSolver,
    number_of_nodes: usize,
    adjacency_list: &[Vec<u32>],
) -> Result<Vec<u32>> {
    let graph = Graph::from_adjacency_list(number_of_nodes, adjacency_list)?;
    Ok(solver.solve(&graph)?.into_vec())
}

/// What one start offset produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    pub start_rank: usize,
    /// Size of the raw sampler candidate.
    pub sampled_size: usize,
    /// Size after closure.
    pub closed_size: usize,
}

/// Full account of one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// The winning maximal clique.
    pub clique: Clique,
    /// Start offset that produced it (`None` for an empty graph).
    pub best_start: Option<usize>,
    /// Sampler window actually used.
    pub window: usize,
    /// One entry per start offset, ascending.
    pub starts: Vec<StartOutcome>,
}

/// Score-guided multi-start solver.
///
/// Scores the graph once, samples one candidate per start offset, closes each
/// to a maximal clique and keeps the largest; among equal sizes the lowest
/// start offset wins, also when starts run in parallel.
#[derive(Debug, Clone)]
pub struct GnnCliqueSolver {
    service: ScoringService,
}

impl GnnCliqueSolver {
    pub fn new(network: Arc<ScoringNetwork>, config: SolverConfig) -> Result<Self> {
        Ok(Self {
            service: ScoringService::new(network, config)?,
        })
    }

    /// Load the network named by `config.model.weights`.
    pub fn from_config(config: &CliqueConfig) -> Result<Self> {
        let path = config.model.weights.as_ref().ok_or_else(|| {
            SolverError::Config("model.weights is not set; no scoring network to load".to_string())
        })?;
        let network = ScoringNetwork::load(path)?;
        Self::new(Arc::new(network), config.solver.clone())
    }

    pub fn service(&self) -> &ScoringService {
        &self.service
    }

    pub fn config(&self) -> &SolverConfig {
        self.service.config()
    }

    /// Solve and report every start offset.
    pub fn solve_with_report(&self, graph: &Graph) -> Result<SolveReport> {
        let n = graph.num_nodes();
        if n == 0 {
            return Ok(SolveReport {
                clique: Clique::new(),
                best_start: None,
                window: 0,
                starts: Vec::new(),
            });
        }

        let walker = self.service.walker(graph)?;
        let (starts, window) = self.config().effective(n);

        let run_start = |start_rank: usize| -> Result<(StartOutcome, Clique)> {
            let candidate = walker.sample(graph, start_rank);
            let closed = close_to_maximal(graph, &candidate)?;
            tracing::debug!(
                start_rank,
                sampled = candidate.len(),
                closed = closed.len(),
                "start offset finished"
            );
            let outcome = StartOutcome {
                start_rank,
                sampled_size: candidate.len(),
                closed_size: closed.len(),
            };
            Ok((outcome, closed))
        };

        // Both paths keep ascending start order for the reduction below
        let results: Vec<(StartOutcome, Clique)> = if self.config().parallel {
            (0..starts)
                .into_par_iter()
                .map(run_start)
                .collect::<Result<_>>()?
        } else {
            (0..starts).map(run_start).collect::<Result<_>>()?
        };

        let mut best: Option<(usize, Clique)> = None;
        let mut outcomes = Vec::with_capacity(results.len());
        for (outcome, closed) in results {
            if best.as_ref().map_or(true, |(_, b)| closed.len() > b.len()) {
                best = Some((outcome.start_rank, closed));
            }
            outcomes.push(outcome);
        }
        let (best_start, clique) = match best {
            Some((start, clique)) => (Some(start), clique),
            None => (None, Clique::new()),
        };

        tracing::info!(
            nodes = n,
            window,
            starts,
            best_size = clique.len(),
            best_start = ?best_start,
            "solve finished"
        );

        Ok(SolveReport {
            clique,
            best_start,
            window,
            starts: outcomes,
        })
    }
}

impl CliqueSolver for GnnCliqueSolver {
    fn solve(&self, graph: &Graph) -> Result<Clique> {
        Ok(self.solve_with_report(graph)?.clique)
    }

    fn name(&self) -> &'static str {
        "gnn"
    }
}

/// Degree-ordered greedy baseline.
///
/// Visits nodes by descending degree (ties to the lower index), keeps each
/// node adjacent to everything kept so far, then closes the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyDegreeSolver;

impl GreedyDegreeSolver {
    pub fn new() -> Self {
        Self
    }
}

impl CliqueSolver for GreedyDegreeSolver {
    fn solve(&self, graph: &Graph) -> Result<Clique> {
        let mut order: Vec<NodeId> = graph.nodes().collect();
        order.sort_by(|&a, &b| graph.degree(b).cmp(&graph.degree(a)).then(a.cmp(&b)));

        let mut kept: Vec<NodeId> = Vec::new();
        for v in order {
            if kept.iter().all(|&u| graph.has_edge(u, v)) {
                kept.push(v);
            }
        }

        let clique = close_to_maximal(graph, &Clique::from_nodes(kept))?;
        tracing::info!(nodes = graph.num_nodes(), best_size = clique.len(), "baseline solve finished");
        Ok(clique)
    }

    fn name(&self) -> &'static str {
        "greedy-degree"
    }
}
