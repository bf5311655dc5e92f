//! Symmetric-normalized propagation over `A + I`.

use ndarray::{Array1, Array2, Axis};

use cliquenet_graph::{CsrMatrix, Graph, GraphError, NodeId};

use crate::{GnnError, Result};

/// `Â = D^(-1/2) (A + I) D^(-1/2)` for one graph.
///
/// Built once per forward pass and shared by every block, since the
/// adjacency does not change between layers.
#[derive(Debug, Clone)]
pub struct NormalizedPropagation {
    /// Adjacency with self-loops.
    adjacency: CsrMatrix,
    /// `d^(-1/2)` where `d = rowsum(A + I)`; always finite since `d ≥ 1`.
    inv_sqrt_degree: Array1<f64>,
}

impl NormalizedPropagation {
    /// Derive the operator from a graph.
    pub fn new(graph: &Graph) -> Self {
        let adjacency = graph.adjacency().with_self_loops();
        let inv_sqrt_degree = adjacency
            .row_sums()
            .into_iter()
            .map(|d| 1.0 / d.sqrt())
            .collect();

        Self {
            adjacency,
            inv_sqrt_degree,
        }
    }

    /// Number of nodes the operator acts on.
    pub fn num_nodes(&self) -> usize {
        self.inv_sqrt_degree.len()
    }

    /// `d^(-1/2)` per node.
    pub fn inv_sqrt_degree(&self) -> &Array1<f64> {
        &self.inv_sqrt_degree
    }

    /// `Â · h`: row-scale by `D`, aggregate over `A + I`, row-scale by `D`.
    pub fn apply(&self, h: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_rows(h)?;
        let d = self.inv_sqrt_degree.view().insert_axis(Axis(1));
        let scaled = h * &d;

        let mut out = Array2::<f64>::zeros(h.raw_dim());
        for (i, mut row) in out.axis_iter_mut(Axis(0)).enumerate() {
            for &j in self.adjacency.neighbors(NodeId(i as u32)) {
                row += &scaled.row(j as usize);
            }
        }
        Ok(out * &d)
    }

    /// Lazy random walk `P · h` with `P = ½(I + Â)`.
    pub fn lazy_walk(&self, h: &Array2<f64>) -> Result<Array2<f64>> {
        Ok((self.apply(h)? + h) * 0.5)
    }

    /// Band-pass channels `|(P - P²)h|^m`, `|(P² - P⁴)h|^m`, `|(P⁴ - P⁸)h|^m`.
    pub fn wavelets(&self, h: &Array2<f64>, moment: u32) -> Result<[Array2<f64>; 3]> {
        let exponent = i32::try_from(moment).map_err(|_| {
            GnnError::InvalidConfig(format!("moment {} exceeds {}", moment, i32::MAX))
        })?;

        // walks[k] = P^k h for k in 0..=8
        let mut walks = Vec::with_capacity(9);
        walks.push(h.clone());
        for k in 1..=8 {
            let next = self.lazy_walk(&walks[k - 1])?;
            walks.push(next);
        }

        let band = |lo: usize, hi: usize| {
            (&walks[lo] - &walks[hi]).mapv_into(|x| x.abs().powi(exponent))
        };
        Ok([band(1, 2), band(2, 4), band(4, 8)])
    }

    fn check_rows(&self, h: &Array2<f64>) -> Result<()> {
        if h.nrows() != self.num_nodes() {
            return Err(GraphError::DimensionMismatch {
                expected: self.num_nodes(),
                actual: h.nrows(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_isolated_nodes_are_fixed_points() {
        let op = NormalizedPropagation::new(&Graph::empty(3));
        let h = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let out = op.apply(&h).unwrap();
        assert_eq!(out, h);
    }

    #[test]
    fn test_single_edge_averages() {
        // A + I = [[1,1],[1,1]], d = 2, Â = ½ [[1,1],[1,1]]
        let graph = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let op = NormalizedPropagation::new(&graph);
        let out = op.apply(&array![[2.0], [4.0]]).unwrap();
        assert!((out[[0, 0]] - 3.0).abs() < 1e-10);
        assert!((out[[1, 0]] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric_normalization_on_path() {
        // Path 0-1-2: d = [2, 3, 2]
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let op = NormalizedPropagation::new(&graph);
        let out = op.apply(&array![[1.0], [0.0], [0.0]]).unwrap();

        assert!((out[[0, 0]] - 0.5).abs() < 1e-10);
        assert!((out[[1, 0]] - 1.0 / 6.0f64.sqrt()).abs() < 1e-10);
        assert!(out[[2, 0]].abs() < 1e-10);
    }

    #[test]
    fn test_wavelets_vanish_on_constant_isolated_signal() {
        let op = NormalizedPropagation::new(&Graph::empty(2));
        let h = array![[1.0], [2.0]];
        for channel in op.wavelets(&h, 1).unwrap() {
            assert!(channel.iter().all(|&x| x.abs() < 1e-12));
        }
    }

    #[test]
    fn test_wavelets_are_non_negative() {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (0, 2)]).unwrap();
        let op = NormalizedPropagation::new(&graph);
        let h = array![[1.0, -1.0], [0.0, 2.0], [-3.0, 0.5], [2.0, 0.0]];
        for channel in op.wavelets(&h, 1).unwrap() {
            assert!(channel.iter().all(|&x| x >= 0.0));
        }
    }

    #[test]
    fn test_wavelet_moment_out_of_range() {
        let op = NormalizedPropagation::new(&Graph::complete(2));
        let h = array![[1.0], [0.0]];
        let result = op.wavelets(&h, u32::MAX);
        assert!(matches!(result, Err(GnnError::InvalidConfig(_))));
    }

    #[test]
    fn test_row_count_mismatch() {
        let op = NormalizedPropagation::new(&Graph::empty(3));
        let result = op.apply(&Array2::zeros((2, 1)));
        assert!(matches!(
            result,
            Err(GnnError::Graph(GraphError::DimensionMismatch { .. }))
        ));
    }
}
