//! Graph algorithms.
//!
//! This module provides the graph-side stages of the clique pipeline:
//! - [`bfs`]: Breadth-first search and eccentricity
//! - [`spmv`]: Sparse matrix-vector multiplication and the completeness form
//! - [`features`]: Structural node features
//! - [`closure`]: Maximal-clique closure

pub mod bfs;
pub mod closure;
pub mod features;
pub mod spmv;

pub use bfs::{bfs_sequential, eccentricity};
pub use closure::close_to_maximal;
pub use features::{extract_features, NodeFeatures, FEATURE_DIM};
pub use spmv::{dot, induces_clique, quadratic_form, spmv};
