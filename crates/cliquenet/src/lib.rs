//! # CliqueNet
//!
//! Approximate maximum-clique solver for undirected graphs.
//!
//! A solve runs one forward pipeline over an immutable [`Graph`]:
//!
//! ```text
//! topology ─▶ features ─▶ scores ─▶ candidates ─▶ closed cliques ─▶ best
//!            (graph)     (gnn)     (sampler)     (closure)        (solver)
//! ```
//!
//! 1. Structural features per node: eccentricity, log-degree, clustering.
//! 2. A loaded [`ScoringNetwork`] turns features into one score per node.
//! 3. A [`GreedyWalker`] ranks nodes by score and, for each start offset,
//!    grows a clique through the top-ranked window using the completeness
//!    form `Z = k² − k − sᵀ A s`.
//! 4. Each candidate is extended to a maximal clique.
//! 5. The largest closed candidate wins; ties go to the earliest start.
//!
//! The result is a heuristic lower bound on the maximum clique, not a
//! certified optimum.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use cliquenet::prelude::*;
//!
//! let network = ScoringNetwork::from_weights(ModelWeights::seeded(&ModelConfig::default(), 7))?;
//! let solver = GnnCliqueSolver::new(Arc::new(network), SolverConfig::default())?;
//!
//! let lists = vec![vec![1, 2], vec![0, 2], vec![0, 1], vec![]];
//! let clique = solve_adjacency(&solver, 4, &lists)?;
//! assert_eq!(clique, vec![0, 1, 2]);
//! # Ok::<(), cliquenet::SolverError>(())
//! ```

pub mod candidates;
pub mod config;
pub mod reward;
pub mod sampler;
pub mod solver;

pub use cliquenet_codec as codec;
pub use cliquenet_gnn as gnn;
pub use cliquenet_graph as graph;

pub use candidates::{CandidateStream, ScoringService};
pub use config::{CliqueConfig, ModelSection, SolverConfig};
pub use reward::{RewardCalculator, RewardScores};
pub use sampler::GreedyWalker;
pub use solver::{
    solve_adjacency, CliqueSolver, GnnCliqueSolver, GreedyDegreeSolver, SolveReport, StartOutcome,
};

use cliquenet_codec::CodecError;
use cliquenet_gnn::GnnError;
use cliquenet_graph::GraphError;

pub use cliquenet_gnn::{ScoreVector, ScoringNetwork};
pub use cliquenet_graph::{Clique, Graph};

/// Solver error types.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Malformed graph or clique.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Wire codec failure.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Scoring network failure.
    #[error("scoring network error: {0}")]
    Gnn(#[from] GnnError),

    /// Configuration could not be read or is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<::config::ConfigError> for SolverError {
    fn from(e: ::config::ConfigError) -> Self {
        SolverError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for SolverError {
    fn from(e: toml::ser::Error) -> Self {
        SolverError::Config(e.to_string())
    }
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        solve_adjacency, CandidateStream, CliqueConfig, CliqueSolver, GnnCliqueSolver,
        GreedyDegreeSolver, GreedyWalker, RewardCalculator, ScoringService, SolveReport,
        SolverConfig, SolverError,
    };
    pub use cliquenet_codec::{CodecConfig, GraphCodec};
    pub use cliquenet_gnn::{ModelConfig, ModelWeights, ScoreVector, ScoringNetwork};
    pub use cliquenet_graph::{close_to_maximal, extract_features, Clique, Graph, NodeId};
}
