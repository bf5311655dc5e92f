//! Compressed Sparse Row (CSR) matrix format.
//!
//! CSR is an efficient format for sparse 0/1 adjacency matrices:
//! - O(1) access to row start/end positions
//! - O(degree) iteration over neighbors
//! - O(log degree) edge lookup, since every row is sorted and de-duplicated
//!
//! Memory layout:
//! - `row_ptr[i]` = starting index in col_idx for row i
//! - `col_idx[row_ptr[i]..row_ptr[i+1]]` = column indices (neighbors) of row i

use super::node::NodeId;
use crate::{GraphError, Result};

/// Compressed Sparse Row matrix for graph adjacency.
///
/// For a graph with N nodes and M stored entries:
/// - `row_ptr`: N+1 elements, where row_ptr[i] is the start of row i's entries
/// - `col_idx`: M elements, the column indices (neighbor node IDs), ascending per row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrMatrix {
    /// Number of rows (nodes).
    pub num_rows: usize,
    /// Number of columns (equals num_rows for square adjacency).
    pub num_cols: usize,
    /// Row pointers (length = num_rows + 1).
    pub row_ptr: Vec<u64>,
    /// Column indices (length = nnz).
    pub col_idx: Vec<u32>,
}

impl CsrMatrix {
    /// Create an empty CSR matrix.
    pub fn empty(num_nodes: usize) -> Self {
        Self {
            num_rows: num_nodes,
            num_cols: num_nodes,
            row_ptr: vec![0; num_nodes + 1],
            col_idx: Vec::new(),
        }
    }

    /// Create CSR from a directed entry list.
    ///
    /// Entries are stored exactly as given (no symmetrization); duplicates
    /// collapse into one entry.
    ///
    /// # Example
    ///
    /// ```
    /// use cliquenet_graph::CsrMatrix;
    ///
    /// let csr = CsrMatrix::from_edges(3, &[(0, 1), (1, 2), (0, 1)]);
    /// assert_eq!(csr.num_nonzeros(), 2);
    /// ```
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32)]) -> Self {
        CsrMatrixBuilder::new(num_nodes).with_edges(edges).build()
    }

    /// Number of non-zero entries.
    pub fn num_nonzeros(&self) -> usize {
        self.col_idx.len()
    }

    /// Check if matrix has no entries.
    pub fn is_empty(&self) -> bool {
        self.col_idx.is_empty()
    }

    /// Get the degree (number of stored entries) of a row.
    pub fn degree(&self, node: NodeId) -> usize {
        let i = node.index();
        if i >= self.num_rows {
            return 0;
        }
        (self.row_ptr[i + 1] - self.row_ptr[i]) as usize
    }

    /// Get neighbors of a node, ascending.
    pub fn neighbors(&self, node: NodeId) -> &[u32] {
        let i = node.index();
        if i >= self.num_rows {
            return &[];
        }
        let start = self.row_ptr[i] as usize;
        let end = self.row_ptr[i + 1] as usize;
        &self.col_idx[start..end]
    }

    /// Check if entry (src, dst) exists.
    pub fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.neighbors(src).binary_search(&dst.0).is_ok()
    }

    /// Row sums of the 0/1 matrix, i.e. the degree vector.
    pub fn row_sums(&self) -> Vec<f64> {
        self.row_ptr
            .windows(2)
            .map(|w| (w[1] - w[0]) as f64)
            .collect()
    }

    /// Return `A + I`: the same matrix with every diagonal entry present.
    pub fn with_self_loops(&self) -> Self {
        let mut builder = CsrMatrixBuilder::new(self.num_rows);
        builder.edges.reserve(self.col_idx.len() + self.num_rows);
        for row in 0..self.num_rows {
            builder.add_edge(row as u32, row as u32);
            for &col in self.neighbors(NodeId(row as u32)) {
                builder.add_edge(row as u32, col);
            }
        }
        builder.build()
    }

    /// Validate CSR structure.
    pub fn validate(&self) -> Result<()> {
        if self.row_ptr.len() != self.num_rows + 1 {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr length {} != num_rows + 1 = {}",
                self.row_ptr.len(),
                self.num_rows + 1
            )));
        }

        for i in 0..self.num_rows {
            if self.row_ptr[i] > self.row_ptr[i + 1] {
                return Err(GraphError::InvalidCsr(format!(
                    "row_ptr not monotonic at index {}",
                    i
                )));
            }
        }

        let nnz = *self.row_ptr.last().unwrap_or(&0) as usize;
        if nnz != self.col_idx.len() {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr[-1] = {} != col_idx.len() = {}",
                nnz,
                self.col_idx.len()
            )));
        }

        for &col in &self.col_idx {
            if col as usize >= self.num_cols {
                return Err(GraphError::InvalidCsr(format!(
                    "col_idx {} >= num_cols {}",
                    col, self.num_cols
                )));
            }
        }

        // Rows must be strictly ascending for binary-search lookups
        for row in 0..self.num_rows {
            let cols = self.neighbors(NodeId(row as u32));
            if cols.windows(2).any(|w| w[0] >= w[1]) {
                return Err(GraphError::InvalidCsr(format!(
                    "row {} is not strictly ascending",
                    row
                )));
            }
        }

        Ok(())
    }
}

/// Builder for CSR matrices.
#[derive(Debug, Default)]
pub struct CsrMatrixBuilder {
    num_nodes: usize,
    edges: Vec<(u32, u32)>,
}

impl CsrMatrixBuilder {
    /// Create new builder with given number of nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
        }
    }

    /// Add entries from slice.
    pub fn with_edges(mut self, edges: &[(u32, u32)]) -> Self {
        self.edges.extend_from_slice(edges);
        self
    }

    /// Add a single entry.
    pub fn add_edge(&mut self, src: u32, dst: u32) {
        self.edges.push((src, dst));
    }

    /// Add both `(a, b)` and `(b, a)`.
    pub fn add_undirected_edge(&mut self, a: u32, b: u32) {
        self.edges.push((a, b));
        self.edges.push((b, a));
    }

    /// Build the CSR matrix.
    ///
    /// Entries whose source lies outside the node range are dropped.
    pub fn build(mut self) -> CsrMatrix {
        let n = self.num_nodes;
        self.edges.retain(|&(src, _)| (src as usize) < n);
        self.edges.sort_unstable();
        self.edges.dedup();

        let mut row_ptr = vec![0u64; n + 1];
        for &(src, _) in &self.edges {
            row_ptr[src as usize + 1] += 1;
        }

        // Cumulative sum
        for i in 1..=n {
            row_ptr[i] += row_ptr[i - 1];
        }

        let col_idx: Vec<u32> = self.edges.iter().map(|e| e.1).collect();

        CsrMatrix {
            num_rows: n,
            num_cols: n,
            row_ptr,
            col_idx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix() {
        let csr = CsrMatrix::empty(5);
        assert_eq!(csr.num_rows, 5);
        assert_eq!(csr.num_nonzeros(), 0);
        assert!(csr.is_empty());
        assert!(csr.validate().is_ok());
    }

    #[test]
    fn test_from_edges_sorts_and_dedups() {
        let csr = CsrMatrix::from_edges(4, &[(1, 3), (0, 2), (1, 2), (0, 2), (0, 1)]);

        assert_eq!(csr.num_nonzeros(), 4);
        assert_eq!(csr.neighbors(NodeId(0)), &[1, 2]);
        assert_eq!(csr.neighbors(NodeId(1)), &[2, 3]);
        assert!(csr.neighbors(NodeId(2)).is_empty());
        assert!(csr.validate().is_ok());
    }

    #[test]
    fn test_degree_and_row_sums() {
        let csr = CsrMatrix::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2)]);

        assert_eq!(csr.degree(NodeId(0)), 3);
        assert_eq!(csr.degree(NodeId(1)), 1);
        assert_eq!(csr.degree(NodeId(9)), 0);
        assert_eq!(csr.row_sums(), vec![3.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_has_edge() {
        let csr = CsrMatrix::from_edges(3, &[(0, 1), (1, 2)]);

        assert!(csr.has_edge(NodeId(0), NodeId(1)));
        assert!(csr.has_edge(NodeId(1), NodeId(2)));
        assert!(!csr.has_edge(NodeId(0), NodeId(2)));
        assert!(!csr.has_edge(NodeId(5), NodeId(0)));
    }

    #[test]
    fn test_with_self_loops() {
        let csr = CsrMatrix::from_edges(3, &[(0, 1), (1, 0)]);
        let looped = csr.with_self_loops();

        assert_eq!(looped.neighbors(NodeId(0)), &[0, 1]);
        assert_eq!(looped.neighbors(NodeId(1)), &[0, 1]);
        assert_eq!(looped.neighbors(NodeId(2)), &[2]);
        assert_eq!(looped.row_sums(), vec![2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_builder_undirected() {
        let mut builder = CsrMatrixBuilder::new(3);
        builder.add_undirected_edge(0, 2);
        builder.add_edge(7, 0); // out of range source is dropped

        let csr = builder.build();
        assert_eq!(csr.num_nonzeros(), 2);
        assert!(csr.has_edge(NodeId(2), NodeId(0)));
    }

    #[test]
    fn test_validation() {
        let csr = CsrMatrix::from_edges(3, &[(0, 1), (1, 2)]);
        assert!(csr.validate().is_ok());

        // Invalid: col_idx out of bounds
        let invalid = CsrMatrix {
            num_rows: 3,
            num_cols: 3,
            row_ptr: vec![0, 1, 2, 2],
            col_idx: vec![1, 10],
        };
        assert!(invalid.validate().is_err());

        // Invalid: unsorted row
        let unsorted = CsrMatrix {
            num_rows: 2,
            num_cols: 2,
            row_ptr: vec![0, 2, 2],
            col_idx: vec![1, 0],
        };
        assert!(unsorted.validate().is_err());
    }
}
