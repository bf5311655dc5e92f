//! Network layers.

use ndarray::{s, Array1, Array2, Axis};

use crate::propagation::NormalizedPropagation;
use crate::weights::{BlockWeights, LinearWeights};
use crate::{GnnError, Result};

/// Leaky-ReLU applied elementwise.
pub fn leaky_relu(x: Array2<f64>, negative_slope: f64) -> Array2<f64> {
    x.mapv_into(|v| leaky(v, negative_slope))
}

#[inline]
fn leaky(v: f64, negative_slope: f64) -> f64 {
    if v >= 0.0 {
        v
    } else {
        v * negative_slope
    }
}

/// Per-node affine map `x · Wᵀ + b`.
#[derive(Debug, Clone)]
pub struct Linear {
    /// `[out, in]`.
    weight: Array2<f64>,
    bias: Array1<f64>,
}

impl Linear {
    /// Build from stored `[out][in]` weights.
    pub fn from_weights(weights: &LinearWeights) -> Result<Self> {
        let (out_dim, in_dim) = (weights.out_dim(), weights.in_dim());
        let flat: Vec<f64> = weights.weight.iter().flatten().copied().collect();
        let weight = Array2::from_shape_vec((out_dim, in_dim), flat).map_err(|e| {
            GnnError::ShapeMismatch {
                tensor: "linear.weight".to_string(),
                expected: format!("[{}][{}]", out_dim, in_dim),
                actual: e.to_string(),
            }
        })?;
        if weights.bias.len() != out_dim {
            return Err(GnnError::ShapeMismatch {
                tensor: "linear.bias".to_string(),
                expected: format!("[{}]", out_dim),
                actual: format!("[{}]", weights.bias.len()),
            });
        }

        Ok(Self {
            weight,
            bias: Array1::from_vec(weights.bias.clone()),
        })
    }

    pub fn in_dim(&self) -> usize {
        self.weight.ncols()
    }

    pub fn out_dim(&self) -> usize {
        self.weight.nrows()
    }

    /// Apply to every row of `x`.
    pub fn forward(&self, x: &Array2<f64>) -> Array2<f64> {
        x.dot(&self.weight.t()) + &self.bias
    }
}

/// Residual graph convolution.
///
/// `support = H·Wᵀ + b`, then
/// `out = (Â·support · smooth + support) / (1 + smooth)`: a convex blend of
/// the propagated signal and the skip signal.
#[derive(Debug, Clone)]
pub struct GcResidual {
    linear: Linear,
    smooth: f64,
}

impl GcResidual {
    pub fn new(linear: Linear, smooth: f64) -> Self {
        Self { linear, smooth }
    }

    /// Residual mixing coefficient.
    pub fn smooth(&self) -> f64 {
        self.smooth
    }

    pub fn forward(&self, op: &NormalizedPropagation, h: &Array2<f64>) -> Result<Array2<f64>> {
        let support = self.linear.forward(h);
        let propagated = op.apply(&support)?;
        Ok((propagated * self.smooth + &support) / (1.0 + self.smooth))
    }
}

/// One scattering block: six filtered channels mixed by per-node attention,
/// followed by a residual convolution.
///
/// Channels are the low-pass `Â H`, `Â² H`, `Â³ H` (leaky-ReLU'd) and the
/// band-pass wavelets of [`NormalizedPropagation::wavelets`]. Attention logits
/// are `leaky_relu([H ‖ C]·a)`, normalized with a softmax over channels.
#[derive(Debug, Clone)]
pub struct ScatteringBlock {
    attention: Array1<f64>,
    residual: GcResidual,
    negative_slope: f64,
}

impl ScatteringBlock {
    pub fn from_weights(weights: &BlockWeights, negative_slope: f64) -> Result<Self> {
        let linear = Linear::from_weights(&weights.residual)?;
        if weights.attention.len() != 2 * linear.in_dim() {
            return Err(GnnError::ShapeMismatch {
                tensor: "block.attention".to_string(),
                expected: format!("[{}]", 2 * linear.in_dim()),
                actual: format!("[{}]", weights.attention.len()),
            });
        }

        Ok(Self {
            attention: Array1::from_vec(weights.attention.clone()),
            residual: GcResidual::new(linear, weights.smooth),
            negative_slope,
        })
    }

    pub fn forward(
        &self,
        op: &NormalizedPropagation,
        h: &Array2<f64>,
        moment: u32,
    ) -> Result<Array2<f64>> {
        let slope = self.negative_slope;
        let low1 = op.apply(h)?;
        let low2 = op.apply(&low1)?;
        let low3 = op.apply(&low2)?;
        let [band1, band2, band3] = op.wavelets(h, moment)?;

        let channels = [
            leaky_relu(low1, slope),
            leaky_relu(low2, slope),
            leaky_relu(low3, slope),
            band1,
            band2,
            band3,
        ];

        let hidden = h.ncols();
        let self_term = h.dot(&self.attention.slice(s![..hidden]));
        let a_channel = self.attention.slice(s![hidden..]);

        // logits[i, c] = leaky([H_i ‖ C_c,i] · a)
        let mut logits = Array2::<f64>::zeros((h.nrows(), channels.len()));
        for (c, channel) in channels.iter().enumerate() {
            let e = &self_term + &channel.dot(&a_channel);
            logits
                .column_mut(c)
                .assign(&e.mapv_into(|v| leaky(v, slope)));
        }
        let alpha = softmax_rows(logits);

        let mut mixed = Array2::<f64>::zeros(h.raw_dim());
        for (c, channel) in channels.iter().enumerate() {
            mixed += &(channel * &alpha.column(c).insert_axis(Axis(1)));
        }

        self.residual.forward(op, &mixed)
    }
}

/// Numerically stable softmax along each row.
fn softmax_rows(mut x: Array2<f64>) -> Array2<f64> {
    for mut row in x.axis_iter_mut(Axis(0)) {
        let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row /= sum;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliquenet_graph::Graph;
    use ndarray::array;

    fn identity_linear(dim: usize) -> Linear {
        let weight = (0..dim)
            .map(|i| (0..dim).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Linear::from_weights(&LinearWeights {
            weight,
            bias: vec![0.0; dim],
        })
        .unwrap()
    }

    #[test]
    fn test_leaky_relu() {
        let out = leaky_relu(array![[-2.0, 0.0, 3.0]], 0.1);
        assert_eq!(out, array![[-0.2, 0.0, 3.0]]);
    }

    #[test]
    fn test_linear_forward() {
        let linear = Linear::from_weights(&LinearWeights {
            weight: vec![vec![1.0, 2.0], vec![0.0, -1.0], vec![0.5, 0.5]],
            bias: vec![1.0, 0.0, 0.0],
        })
        .unwrap();
        assert_eq!(linear.in_dim(), 2);
        assert_eq!(linear.out_dim(), 3);

        let out = linear.forward(&array![[1.0, 1.0], [2.0, 0.0]]);
        assert_eq!(out, array![[4.0, -1.0, 1.0], [3.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_linear_rejects_ragged_rows() {
        let result = Linear::from_weights(&LinearWeights {
            weight: vec![vec![1.0, 2.0], vec![3.0]],
            bias: vec![0.0, 0.0],
        });
        assert!(matches!(result, Err(GnnError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_residual_blend() {
        // Â = ½[[1,1],[1,1]] on a single edge; smooth = 1 gives (Â x + x) / 2
        let graph = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let op = NormalizedPropagation::new(&graph);
        let block = GcResidual::new(identity_linear(1), 1.0);

        let out = block.forward(&op, &array![[2.0], [4.0]]).unwrap();
        assert!((out[[0, 0]] - 2.5).abs() < 1e-10);
        assert!((out[[1, 0]] - 3.5).abs() < 1e-10);
    }

    #[test]
    fn test_residual_zero_smooth_is_skip_only() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let op = NormalizedPropagation::new(&graph);
        let block = GcResidual::new(identity_linear(2), 0.0);

        let h = array![[1.0, 0.0], [0.0, 1.0], [2.0, 2.0]];
        assert_eq!(block.forward(&op, &h).unwrap(), h);
    }

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let alpha = softmax_rows(array![[1.0, 2.0, 3.0], [1000.0, 1000.0, 0.0]]);
        for row in alpha.axis_iter(Axis(0)) {
            assert!((row.sum() - 1.0).abs() < 1e-12);
        }
        assert!((alpha[[1, 0]] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scattering_block_keeps_shape() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
        let op = NormalizedPropagation::new(&graph);
        let weights = BlockWeights {
            attention: vec![0.1, -0.2, 0.3, 0.4],
            smooth: 0.5,
            residual: LinearWeights {
                weight: vec![vec![1.0, 0.5], vec![-0.5, 1.0]],
                bias: vec![0.0, 0.1],
            },
        };
        let block = ScatteringBlock::from_weights(&weights, 0.01).unwrap();

        let h = Array2::from_shape_fn((5, 2), |(i, j)| (i + j) as f64 * 0.1);
        let out = block.forward(&op, &h, 1).unwrap();
        assert_eq!(out.dim(), (5, 2));
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
