//! Validated simple undirected graph.
//!
//! A [`Graph`] is the immutable input of one solve. Construction enforces the
//! data-model invariants (indices in range, no self-loops, symmetric adjacency),
//! so every downstream stage can read it without re-checking.

use super::csr::{CsrMatrix, CsrMatrixBuilder};
use super::node::NodeId;
use crate::{GraphError, Result};

/// Simple undirected graph backed by a symmetric CSR adjacency matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: CsrMatrix,
}

impl Graph {
    /// Build a graph from one neighbor list per node.
    ///
    /// Duplicate neighbors collapse. Out-of-range indices, self-loops and
    /// one-directional edges are rejected.
    pub fn from_adjacency_list(num_nodes: usize, lists: &[Vec<u32>]) -> Result<Self> {
        if lists.len() != num_nodes {
            return Err(GraphError::DimensionMismatch {
                expected: num_nodes,
                actual: lists.len(),
            });
        }

        let mut builder = CsrMatrixBuilder::new(num_nodes);
        for (node, neighbors) in lists.iter().enumerate() {
            for &neighbor in neighbors {
                if neighbor as usize >= num_nodes {
                    return Err(GraphError::InvalidNodeId(neighbor as u64));
                }
                if neighbor as usize == node {
                    return Err(GraphError::SelfLoop(neighbor));
                }
                builder.add_edge(node as u32, neighbor);
            }
        }

        let adjacency = builder.build();
        for node in 0..num_nodes as u32 {
            for &neighbor in adjacency.neighbors(NodeId(node)) {
                if !adjacency.has_edge(NodeId(neighbor), NodeId(node)) {
                    return Err(GraphError::Asymmetric {
                        from: node,
                        to: neighbor,
                    });
                }
            }
        }

        Ok(Self { adjacency })
    }

    /// Build a graph from undirected edges; each pair is stored both ways.
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32)]) -> Result<Self> {
        let mut builder = CsrMatrixBuilder::new(num_nodes);
        for &(a, b) in edges {
            if a as usize >= num_nodes {
                return Err(GraphError::InvalidNodeId(a as u64));
            }
            if b as usize >= num_nodes {
                return Err(GraphError::InvalidNodeId(b as u64));
            }
            if a == b {
                return Err(GraphError::SelfLoop(a));
            }
            builder.add_undirected_edge(a, b);
        }
        Ok(Self {
            adjacency: builder.build(),
        })
    }

    /// Graph with `num_nodes` nodes and no edges.
    pub fn empty(num_nodes: usize) -> Self {
        Self {
            adjacency: CsrMatrix::empty(num_nodes),
        }
    }

    /// Complete graph `K_n`.
    pub fn complete(num_nodes: usize) -> Self {
        let mut builder = CsrMatrixBuilder::new(num_nodes);
        for a in 0..num_nodes as u32 {
            for b in 0..num_nodes as u32 {
                if a != b {
                    builder.add_edge(a, b);
                }
            }
        }
        Self {
            adjacency: builder.build(),
        }
    }

    /// Number of nodes `N`.
    pub fn num_nodes(&self) -> usize {
        self.adjacency.num_rows
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.adjacency.num_nonzeros() / 2
    }

    /// Whether the graph has zero nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.num_rows == 0
    }

    /// Underlying symmetric adjacency matrix.
    pub fn adjacency(&self) -> &CsrMatrix {
        &self.adjacency
    }

    /// Neighbors of `node`, ascending.
    pub fn neighbors(&self, node: NodeId) -> &[u32] {
        self.adjacency.neighbors(node)
    }

    /// Degree of `node`.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.degree(node)
    }

    /// Whether `a` and `b` are adjacent.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency.has_edge(a, b)
    }

    /// Iterate over all node IDs in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.num_nodes() as u32).map(NodeId)
    }

    /// Export as one ascending neighbor list per node.
    pub fn to_adjacency_list(&self) -> Vec<Vec<u32>> {
        self.nodes().map(|n| self.neighbors(n).to_vec()).collect()
    }
}
