//! Error types for the CliqueNet CLI.

use cliquenet::codec::CodecError;
use cliquenet::gnn::GnnError;
use cliquenet::SolverError;
use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Solver, graph or model failure.
    #[error("{0}")]
    Solver(#[from] SolverError),

    /// Wire codec failure.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<GnnError> for CliError {
    fn from(e: GnnError) -> Self {
        CliError::Solver(SolverError::Gnn(e))
    }
}

impl From<cliquenet::graph::GraphError> for CliError {
    fn from(e: cliquenet::graph::GraphError) -> Self {
        CliError::Solver(SolverError::Graph(e))
    }
}
