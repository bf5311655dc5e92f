//! Undirected graph primitives for CliqueNet.
//!
//! This crate provides the graph-side building blocks of the clique solver:
//!
//! - **CSR Matrix**: Compressed Sparse Row storage with sorted neighbor rows
//! - **Graph**: validated simple undirected graph (symmetric, no self-loops)
//! - **BFS**: shortest hop distances, used for node eccentricity
//! - **SpMV**: sparse matrix-vector multiplication and the quadratic
//!   completeness form `k² − k − Σ s·(A·s)`
//! - **Features**: per-node `[eccentricity, ln(degree), clustering]`
//! - **Closure**: deterministic extension of a clique to a maximal clique
//!
//! # Example
//!
//! ```
//! use cliquenet_graph::{close_to_maximal, Clique, Graph};
//!
//! // Triangle {0, 1, 2} plus an isolated node 3
//! let graph = Graph::from_adjacency_list(4, &[vec![1, 2], vec![0, 2], vec![0, 1], vec![]])?;
//!
//! let closed = close_to_maximal(&graph, &Clique::from_nodes([1u32]))?;
//! assert_eq!(closed.as_slice(), &[0, 1, 2]);
//! assert!(closed.is_maximal(&graph));
//! # Ok::<(), cliquenet_graph::GraphError>(())
//! ```

pub mod algorithms;
pub mod models;

// Re-export main types
pub use algorithms::bfs::{bfs_sequential, eccentricity};
pub use algorithms::closure::close_to_maximal;
pub use algorithms::features::{extract_features, NodeFeatures, FEATURE_DIM};
pub use algorithms::spmv::{dot, induces_clique, quadratic_form, spmv};
pub use models::clique::Clique;
pub use models::csr::{CsrMatrix, CsrMatrixBuilder};
pub use models::graph::Graph;
pub use models::node::{Distance, NodeId};

/// Graph error types.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node index outside `[0, N)`.
    #[error("Invalid node ID: {0}")]
    InvalidNodeId(u64),

    /// Node listed as its own neighbor.
    #[error("Self-loop on node {0}")]
    SelfLoop(u32),

    /// Edge present in one direction only.
    #[error("Asymmetric adjacency: {from} -> {to} has no reverse edge")]
    Asymmetric { from: u32, to: u32 },

    /// Dimension mismatch between a graph and a vector or list.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Empty graph.
    #[error("Empty graph")]
    EmptyGraph,

    /// Invalid CSR format.
    #[error("Invalid CSR format: {0}")]
    InvalidCsr(String),

    /// Node set is not a clique of the graph.
    #[error("Not a clique: {0}")]
    NotAClique(String),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
