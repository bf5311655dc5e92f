//! Node scoring network for CliqueNet.
//!
//! A fixed, already-trained graph network maps per-node structural features
//! to one score per node; higher means more likely to sit in a large clique.
//!
//! The forward pass is:
//!
//! 1. scale features by `1/sqrt(N)` and project them to the hidden width;
//! 2. run `n_layers` scattering blocks over the symmetric-normalized operator
//!    `Â = D^(-1/2)(A + I)D^(-1/2)` ([`NormalizedPropagation`]); each block mixes
//!    low-pass (`Â^k H`) and band-pass (wavelet) channels with per-node
//!    attention, then applies a residual convolution ([`GcResidual`]);
//! 3. concatenate every hidden state, read out one scalar per node and
//!    min-max normalize to `[0, 1)`.
//!
//! Parameters are loaded once from a JSON file ([`ModelWeights`]) into an
//! immutable [`ScoringNetwork`] that can be shared across threads.
//!
//! # Example
//!
//! ```
//! use cliquenet_gnn::{ModelConfig, ModelWeights, ScoringNetwork};
//! use cliquenet_graph::Graph;
//!
//! let weights = ModelWeights::seeded(&ModelConfig::default(), 7);
//! let network = ScoringNetwork::from_weights(weights)?;
//!
//! let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2)])?;
//! let scores = network.score_graph(&graph, 1)?;
//! assert_eq!(scores.len(), 4);
//! assert!(scores.iter().all(|s| (0.0..1.0).contains(&s)));
//! # Ok::<(), cliquenet_gnn::GnnError>(())
//! ```

pub mod config;
pub mod layers;
pub mod network;
pub mod propagation;
pub mod weights;

pub use config::ModelConfig;
pub use layers::{leaky_relu, GcResidual, Linear, ScatteringBlock};
pub use network::{ScoreVector, ScoringNetwork};
pub use propagation::NormalizedPropagation;
pub use weights::{BlockWeights, LinearWeights, ModelWeights, FORMAT_VERSION};

use cliquenet_graph::GraphError;

/// Scoring network error types.
#[derive(Debug, thiserror::Error)]
pub enum GnnError {
    /// Parameter file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter file is not valid JSON for the expected layout.
    #[error("parameter parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A tensor has the wrong shape for the configured architecture.
    #[error("shape mismatch for {tensor}: expected {expected}, got {actual}")]
    ShapeMismatch {
        tensor: String,
        expected: String,
        actual: String,
    },

    /// Parameter file written by an incompatible version.
    #[error("unsupported parameter format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Architecture parameters are inconsistent.
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),

    /// A parameter or computed score is NaN or infinite.
    #[error("non-finite value in {0}")]
    NonFinite(String),

    /// Graph-level failure.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for scoring network operations.
pub type Result<T> = std::result::Result<T, GnnError>;
