//! Sparse Matrix-Vector Multiplication (SpMV) and the completeness form.
//!
//! Computes y = A * x where A is a 0/1 sparse matrix in CSR format. The
//! sampler's completeness test is the quadratic form
//!
//! ```text
//! Z(s) = k² − k − Σ_v s[v] · (A·s)[v],    k = Σ_v s[v]
//! ```
//!
//! For a 0/1 vector `s`, the sum counts ordered adjacent pairs inside the set,
//! i.e. twice its edge count, so `Z(s) == 0` exactly when `s` induces a
//! complete subgraph and `Z(s) > 0` otherwise.

use crate::models::{CsrMatrix, Graph, NodeId};
use crate::{GraphError, Result};

/// Sequential SpMV: y = A * x.
///
/// # Arguments
///
/// * `matrix` - 0/1 sparse matrix in CSR format
/// * `x` - Input vector
///
/// # Returns
///
/// Output vector y = A * x
pub fn spmv(matrix: &CsrMatrix, x: &[f64]) -> Result<Vec<f64>> {
    if x.len() != matrix.num_cols {
        return Err(GraphError::DimensionMismatch {
            expected: matrix.num_cols,
            actual: x.len(),
        });
    }

    let y: Vec<f64> = (0..matrix.num_rows)
        .map(|row| {
            matrix
                .neighbors(NodeId(row as u32))
                .iter()
                .map(|&col| x[col as usize])
                .sum::<f64>()
        })
        .collect();

    Ok(y)
}

/// Compute dot product of two vectors.
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y.iter()).map(|(&a, &b)| a * b).sum()
}

/// Evaluate `Z(s) = k² − k − s·(A·s)` for a membership vector.
pub fn quadratic_form(graph: &Graph, membership: &[f64]) -> Result<f64> {
    let k: f64 = membership.iter().sum();
    let propagated = spmv(graph.adjacency(), membership)?;
    Ok(k * k - k - dot(membership, &propagated))
}

/// Brute-force pairwise check that `nodes` induces a complete subgraph.
pub fn induces_clique(graph: &Graph, nodes: &[u32]) -> bool {
    nodes.iter().enumerate().all(|(i, &a)| {
        nodes[i + 1..]
            .iter()
            .all(|&b| a != b && graph.has_edge(NodeId(a), NodeId(b)))
    })
}
