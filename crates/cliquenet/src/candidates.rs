//! Scoring service and the lazy candidate sequence.

use std::borrow::Cow;
use std::iter::FusedIterator;
use std::sync::Arc;

use cliquenet_gnn::{ScoreVector, ScoringNetwork};
use cliquenet_graph::{Clique, Graph};

use crate::config::SolverConfig;
use crate::sampler::GreedyWalker;
use crate::Result;

/// Scores graphs with a loaded network and hands out sampler candidates.
///
/// Holds the network behind an `Arc`; cloning the service is cheap and
/// every clone shares the same parameters.
#[derive(Debug, Clone)]
pub struct ScoringService {
    network: Arc<ScoringNetwork>,
    config: SolverConfig,
}

impl ScoringService {
    /// Wrap a loaded network.
    pub fn new(network: Arc<ScoringNetwork>, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { network, config })
    }

    pub fn network(&self) -> &ScoringNetwork {
        &self.network
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// One score per node of `graph`.
    pub fn score(&self, graph: &Graph) -> Result<ScoreVector> {
        Ok(self.network.score_graph(graph, self.config.moment)?)
    }

    /// Score `graph` and build its walker.
    pub fn walker(&self, graph: &Graph) -> Result<GreedyWalker> {
        let scores = self.score(graph)?;
        let (_, window) = self.config.effective(graph.num_nodes());
        GreedyWalker::new(graph, &scores, window, self.config.tolerance)
    }

    /// Raw candidates for a borrowed graph, one per start offset.
    pub fn candidates<'g>(&self, graph: &'g Graph) -> Result<CandidateStream<'g>> {
        let walker = self.walker(graph)?;
        let (starts, _) = self.config.effective(graph.num_nodes());
        Ok(CandidateStream::new(Cow::Borrowed(graph), walker, starts))
    }

    /// Validate an adjacency list and return its candidate sequence.
    ///
    /// The sequence is finite and cannot be restarted once consumed; call
    /// again to regenerate it.
    pub fn score_candidates(
        &self,
        number_of_nodes: usize,
        adjacency_list: &[Vec<u32>],
    ) -> Result<CandidateStream<'static>> {
        let graph = Graph::from_adjacency_list(number_of_nodes, adjacency_list)?;
        let walker = self.walker(&graph)?;
        let (starts, _) = self.config.effective(graph.num_nodes());
        Ok(CandidateStream::new(Cow::Owned(graph), walker, starts))
    }
}

/// Finite sequence of raw candidates, one per start offset in ascending order.
///
/// Candidates are cliques but not necessarily maximal.
#[derive(Debug)]
pub struct CandidateStream<'g> {
    graph: Cow<'g, Graph>,
    walker: GreedyWalker,
    next_start: usize,
    starts: usize,
}

impl<'g> CandidateStream<'g> {
    fn new(graph: Cow<'g, Graph>, walker: GreedyWalker, starts: usize) -> Self {
        Self {
            graph,
            walker,
            next_start: 0,
            starts,
        }
    }

    /// The graph candidates are drawn from.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Start offset the next candidate will use.
    pub fn next_start(&self) -> usize {
        self.next_start
    }
}

impl Iterator for CandidateStream<'_> {
    type Item = Clique;

    fn next(&mut self) -> Option<Clique> {
        if self.next_start >= self.starts {
            return None;
        }
        let clique = self.walker.sample(&self.graph, self.next_start);
        self.next_start += 1;
        Some(clique)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.starts - self.next_start;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CandidateStream<'_> {}

impl FusedIterator for CandidateStream<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use cliquenet_gnn::{ModelConfig, ModelWeights};

    fn service(config: SolverConfig) -> ScoringService {
        let weights = ModelWeights::seeded(&ModelConfig::default(), 5);
        let network = ScoringNetwork::from_weights(weights).unwrap();
        ScoringService::new(Arc::new(network), config).unwrap()
    }

    #[test]
    fn test_stream_length_is_capped() {
        let lists = vec![vec![1], vec![0, 2], vec![1]];
        let stream = service(SolverConfig::default())
            .score_candidates(3, &lists)
            .unwrap();
        assert_eq!(stream.len(), 3);

        let candidates: Vec<Clique> = stream.collect();
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_stream_is_fused() {
        let graph = Graph::complete(2);
        let mut stream = service(SolverConfig::default()).candidates(&graph).unwrap();
        assert!(stream.next().is_some());
        assert!(stream.next().is_some());
        assert_eq!(stream.len(), 0);
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_regenerating_gives_same_candidates() {
        let svc = service(SolverConfig::default().with_num_starts(3));
        let lists = vec![vec![1, 2], vec![0, 2], vec![0, 1], vec![], vec![]];
        let first: Vec<Clique> = svc.score_candidates(5, &lists).unwrap().collect();
        let second: Vec<Clique> = svc.score_candidates(5, &lists).unwrap().collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_malformed_adjacency() {
        let svc = service(SolverConfig::default());
        assert!(svc.score_candidates(2, &[vec![1], vec![]]).is_err());
        assert!(svc.score_candidates(2, &[vec![0], vec![]]).is_err());
        assert!(svc.score_candidates(1, &[vec![3]]).is_err());
    }

    #[test]
    fn test_empty_graph_has_no_candidates() {
        let stream = service(SolverConfig::default())
            .score_candidates(0, &[])
            .unwrap();
        assert_eq!(stream.count(), 0);
    }
}
