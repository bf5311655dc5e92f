//! Graph data models.
//!
//! This module provides the core data structures for representing graphs:
//! - [`CsrMatrix`]: Compressed Sparse Row format for adjacency matrices
//! - [`Graph`]: validated simple undirected graph
//! - [`Clique`]: sorted node set checked against a graph
//! - [`NodeId`], [`Distance`]: graph node types

pub mod clique;
pub mod csr;
pub mod graph;
pub mod node;

pub use clique::Clique;
pub use csr::{CsrMatrix, CsrMatrixBuilder};
pub use graph::Graph;
pub use node::{Distance, NodeId};
